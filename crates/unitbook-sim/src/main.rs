//! `unitbook-sim [config.json]`
//!
//! Runs one simulated order stream against a fresh book and reports the
//! final ladder and call-market outcome.

use std::process::ExitCode;

use unitbook_sim::{Simulation, init_tracing};
use unitbook_types::{LogFormat, Result, SimulationConfig, constants};

fn load_config() -> Result<SimulationConfig> {
    match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_path(path),
        None => Ok(SimulationConfig::default()),
    }
}

fn run(config: SimulationConfig) -> Result<()> {
    let format = config.log_format;
    let mut sim = Simulation::new(config)?;
    let report = sim.run()?;

    match format {
        LogFormat::Text => {
            tracing::info!("Final book:\n{}", sim.book());
            match report.clearing {
                Some(result) => tracing::info!(%result, "Call market result"),
                None => tracing::info!("Call market skipped"),
            }
        }
        LogFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e}", constants::ENGINE_NAME);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_tracing(config.log_format) {
        eprintln!("{}: {e}", constants::ENGINE_NAME);
        return ExitCode::FAILURE;
    }
    tracing::info!(
        version = constants::VERSION,
        orders = config.order_count,
        seed = ?config.seed,
        "Starting {} simulation",
        constants::ENGINE_NAME
    );

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Simulation failed");
            ExitCode::FAILURE
        }
    }
}
