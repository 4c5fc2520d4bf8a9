//! Single-point capacity command.

use anyhow::{bail, Result};
use clap::Args;
use shearwall_core::calculations::{design_strength, validate, DesignLoads};
use shearwall_core::root_finding::SolverSettings;

use super::{print_banner, print_diagnostics, print_section, WallArgs};

/// Capacity arguments
#[derive(Args)]
pub struct CapacityArgs {
    #[command(flatten)]
    pub wall: WallArgs,

    /// Axial load N* in kN (defaults to the input file's design load)
    #[arg(short, long, allow_negative_numbers = true)]
    pub axial: Option<f64>,
}

pub fn execute(args: CapacityArgs) -> Result<()> {
    let input = args.wall.load()?;
    let loads = match args.axial {
        Some(axial_kn) => DesignLoads {
            axial_kn,
            ..input.loads
        },
        None => input.loads,
    };

    let validation = validate(&input.section, &loads)?;
    let section = &validation.section;

    print_banner("FLEXURAL CAPACITY");
    print_section(&input.label, &section.spec);
    print_diagnostics(&validation);
    println!();

    let capacity = match design_strength(section, loads.axial_kn, None, &SolverSettings::default()) {
        Ok(capacity) => capacity,
        Err(failure) => bail!("No capacity at N* = {:.1} kN: {}", loads.axial_kn, failure),
    };

    println!(
        "N* = {:.1} kN, c = {:.1} mm ({} iterations, residual {:.2e} kN)",
        capacity.axial_load_kn, capacity.neutral_axis_mm, capacity.iterations, capacity.residual_kn
    );
    println!();
    println!("   x (mm)     εs        fs (MPa)   F (kN)     M (kNm)");
    println!("  ─────────────────────────────────────────────────────");
    for bar in &capacity.bars {
        if bar.in_tension {
            println!(
                "  {:8.1}  {:9.6}  {:8.1}  {:9.1}  {:9.1}",
                bar.position_mm, bar.strain, bar.stress_mpa, bar.force_kn, bar.moment_knm
            );
        } else {
            println!("  {:8.1}  (compression zone)", bar.position_mm);
        }
    }
    println!();
    println!("Ts   = {:10.1} kN", capacity.tension_kn);
    println!("Cc   = {:10.1} kN", capacity.compression_kn);
    println!("M_s  = {:10.1} kNm", capacity.steel_moment_knm);
    println!("M_N  = {:10.1} kNm", capacity.axial_moment_knm);
    println!("M_n  = {:10.1} kNm", capacity.nominal_moment_knm);
    println!("φM_n = {:10.1} kNm", capacity.design_moment_knm);

    if let Some(m_star) = input.design_moment_knm.filter(|_| args.axial.is_none()) {
        println!();
        println!(
            "M* = {:.1} kNm, M*/φM_n = {:.2}",
            m_star,
            m_star / capacity.design_moment_knm
        );
    }
    Ok(())
}
