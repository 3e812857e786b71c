use clap::Parser;
use env_logger::Env;
use fxsim_runner::{FxMarketSimulation, SimulationResult, load_config, load_default_config};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Multi-pair FX market simulation with consensus pricing
#[derive(Parser)]
#[command(name = "fx-sim")]
#[command(about = "Simulate an FX market priced by a depth-weighted VWAP consensus")]
struct Cli {
    /// JSON configuration file (embedded default if omitted)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Override the configured number of steps
    #[arg(long)]
    steps: Option<usize>,

    /// Override the configured master seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> SimulationResult<()> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => load_default_config()?,
    };
    if let Some(steps) = cli.steps {
        config.steps = steps;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut simulation = FxMarketSimulation::with_config(config)?;
    let results = simulation.run_configured()?;

    for pair in results.degraded_pairs() {
        warn!("{} priced direct: cross legs not traded", pair);
    }
    Ok(())
}
