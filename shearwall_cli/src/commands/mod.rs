//! Subcommands and the helpers they share.

pub mod capacity;
pub mod curve;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use shearwall_core::calculations::{DuctilityClass, SectionSpec, ShearWallInput, ValidationResult};
use shearwall_core::units::{Meters, Millimeters};

/// Wall input shared by every subcommand.
#[derive(Args)]
pub struct WallArgs {
    /// Wall input file (JSON)
    pub input: PathBuf,

    /// Override the ductility class (elastic, limited-ductile, fully-ductile)
    #[arg(short, long)]
    pub ductility: Option<DuctilityClass>,
}

impl WallArgs {
    /// Read the input file and apply command-line overrides.
    pub fn load(&self) -> Result<ShearWallInput> {
        let text = std::fs::read_to_string(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;
        let mut input = ShearWallInput::from_json(&text)
            .with_context(|| format!("Failed to parse {}", self.input.display()))?;
        if let Some(ductility) = self.ductility {
            input.section.ductility = ductility;
        }
        Ok(input)
    }
}

pub fn print_banner(title: &str) {
    println!("═══════════════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════════════");
}

/// Section summary as printed above every report.
pub fn print_section(label: &str, spec: &SectionSpec) {
    let l_w = Meters::from(Millimeters(spec.length_mm));
    let h_w = Meters::from(Millimeters(spec.height_mm));

    if !label.is_empty() {
        println!("Wall:       {}", label);
    }
    println!("Section:    t = {} mm, l_w = {:.2} m, h_w = {:.2} m", spec.thickness_mm, l_w.value(), h_w.value());
    println!("Concrete:   f'c = {} MPa", spec.f_c_mpa);
    println!(
        "Steel:      {} layer(s) D{} @ {} mm, f_y = {} MPa",
        spec.layers, spec.bar_diameter_mm, spec.bar_spacing_mm, spec.f_y_mpa
    );
    println!("Ductility:  {}", spec.ductility);
    println!();
}

/// Warnings and failed checks, each with its clause reference.
pub fn print_diagnostics(validation: &ValidationResult) {
    if validation.warnings.is_empty() && validation.errors.is_empty() {
        println!("All checks passed.");
        return;
    }
    for warning in &validation.warnings {
        println!("  ⚠ {}", warning.cited());
    }
    for error in &validation.errors {
        println!("  ✗ {}", error.cited());
    }
}
