//! # Shearwall CLI
//!
//! Command-line front end for `shearwall_core`: validates a wall section,
//! reports its flexural capacity, and prints its P–M interaction curve.
//!
//! ```text
//! shearwall validate wall.json
//! shearwall capacity wall.json --axial 2000
//! shearwall curve wall.json --show-exceeded
//! shearwall curve wall.json --json > curve.json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Reinforced concrete wall P–M interaction tool
#[derive(Parser)]
#[command(name = "shearwall")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reinforced concrete wall P-M interaction per NZS 3101", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the detailing checks and list diagnostics
    Validate(commands::validate::ValidateArgs),
    /// Flexural capacity at one axial load, bar by bar
    Capacity(commands::capacity::CapacityArgs),
    /// Sweep the axial load and print the interaction curve
    Curve(commands::curve::CurveArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Capacity(args) => commands::capacity::execute(args),
        Commands::Curve(args) => commands::curve::execute(args),
    }
}
