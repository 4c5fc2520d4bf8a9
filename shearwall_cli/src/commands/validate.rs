//! Detailing check command.

use anyhow::{bail, Result};
use clap::Args;
use shearwall_core::calculations::{validate, DuctilityClass, ValidationResult};
use tracing::info;

use super::{print_banner, print_diagnostics, print_section, WallArgs};

/// Validation arguments
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub wall: WallArgs,

    /// Treat warnings (adjusted inputs, unchecked actions) as failures
    #[arg(long)]
    pub strict: bool,

    /// Also print the informational trace of computed values
    #[arg(short, long)]
    pub verbose: bool,

    /// Check the section under every ductility class
    #[arg(long, conflicts_with = "ductility")]
    pub all_classes: bool,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let input = args.wall.load()?;
    info!(input = %args.wall.input.display(), "validating wall");

    print_banner("WALL SECTION CHECKS");
    print_section(&input.label, &input.section);

    if args.all_classes {
        let mut failed = Vec::new();
        for ductility in DuctilityClass::ALL {
            let mut spec = input.section.clone();
            spec.ductility = ductility;
            let validation = validate(&spec, &input.loads)?;
            println!("── {} ──", ductility);
            report(&validation, args.verbose);
            println!();
            if !passes(&validation, args.strict) {
                failed.push(ductility.display_name());
            }
        }
        if !failed.is_empty() {
            bail!("Checks failed for: {}", failed.join(", "));
        }
        return Ok(());
    }

    let validation = validate(&input.section, &input.loads)?;
    report(&validation, args.verbose);

    if !passes(&validation, args.strict) {
        bail!(
            "{} check(s) failed, {} warning(s)",
            validation.errors.len(),
            validation.warnings.len()
        );
    }
    Ok(())
}

fn passes(validation: &ValidationResult, strict: bool) -> bool {
    validation.complies() && !(strict && !validation.warnings.is_empty())
}

fn report(validation: &ValidationResult, verbose: bool) {
    let section = &validation.section;
    println!(
        "Bars:       {} positions, A_s = {:.0} mm², ρ_l = {:.5}",
        section.bar_count(),
        section.steel_area_mm2,
        section.reinforcement_ratio
    );
    println!(
        "Limits:     ρ_min = {:.5}, ρ_max = {:.5}, N_max = {:.0} kN",
        section.min_reinforcement_ratio, section.max_reinforcement_ratio, section.axial_capacity_kn
    );
    println!(
        "Detailing:  D{} @ {} mm after adjustment",
        section.spec.bar_diameter_mm, section.spec.bar_spacing_mm
    );

    if verbose {
        for log in &validation.logs {
            println!("  · {}", log.cited());
        }
    }
    print_diagnostics(validation);
}
