//! Interaction curve command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use shearwall_core::calculations::shear_wall::calculate;
use shearwall_core::calculations::{InteractionCurve, SweepConfig};
use tracing::info;

use super::{print_banner, print_diagnostics, print_section, WallArgs};

/// Curve arguments
#[derive(Args)]
pub struct CurveArgs {
    #[command(flatten)]
    pub wall: WallArgs,

    /// Sweep configuration file (JSON); flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First axial load sampled (kN)
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<f64>,

    /// Axial step is N_max divided by this
    #[arg(long)]
    pub step_divisor: Option<f64>,

    /// Maximum number of samples
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// Design moment M* (kNm), overriding the input file
    #[arg(short, long)]
    pub moment: Option<f64>,

    /// Also list samples above the axial load limit
    #[arg(long)]
    pub show_exceeded: bool,

    /// Print the full result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl CurveArgs {
    fn sweep_config(&self) -> Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => SweepConfig::default(),
        };
        if let Some(start) = self.start {
            config.axial_load_start_kn = start;
        }
        if let Some(divisor) = self.step_divisor {
            config.step_divisor = divisor;
        }
        if let Some(steps) = self.max_steps {
            config.iteration_ceiling = steps;
        }
        Ok(config)
    }
}

pub fn execute(args: CurveArgs) -> Result<()> {
    let mut input = args.wall.load()?;
    if args.moment.is_some() {
        input.design_moment_knm = args.moment;
    }
    let config = args.sweep_config()?;
    info!(?config, "sweep configuration");

    let result = calculate(&input, &config)?;

    if args.json {
        println!("{}", result.to_json_pretty()?);
        return Ok(());
    }

    print_banner("P-M INTERACTION");
    print_section(&input.label, &result.validation.section.spec);
    print_diagnostics(&result.validation);
    println!();

    print_curve(&result.curve, args.show_exceeded);
    println!();
    println!("Sweep stopped: {}", result.curve.termination.describe());

    if let Some((m_star, n_star)) = input.design_point() {
        println!();
        println!("Design point: M* = {:.1} kNm, N* = {:.1} kN", m_star, n_star);
        match result.curve.moment_capacity_at(n_star) {
            Some(capacity) if m_star <= capacity => {
                println!("  φM_n at N* = {:.1} kNm, inside the envelope", capacity)
            }
            Some(capacity) => {
                println!("  φM_n at N* = {:.1} kNm, OUTSIDE the envelope", capacity)
            }
            None => println!("  N* is outside the sampled axial range"),
        }
    }
    Ok(())
}

fn print_curve(curve: &InteractionCurve, show_exceeded: bool) {
    println!("N_max = {:.1} kN", curve.axial_capacity_kn);
    println!();
    println!("   φM_n (kNm)    N* (kN)");
    println!("  ──────────────────────────");
    for point in curve.within_limit_curve() {
        println!("  {:11.1}  {:10.1}", point.moment_knm, point.axial_kn);
    }

    if show_exceeded {
        let exceeding = curve.exceeds_limit_curve();
        if !exceeding.is_empty() {
            println!();
            println!("  Above N_max:");
            for point in exceeding {
                println!("  {:11.1}  {:10.1}", point.moment_knm, point.axial_kn);
            }
        }
    }
}
