//! Arena - match runner for Hadron strategies
//!
//! Plays a series of games between two configured strategies (random,
//! alpha-beta, MCTS, hybrid MCTS) and reports the win counts. With
//! `--report` it instead lets each strategy choose one opening move on an
//! instrumented game and logs how many game-model calls that took.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod agent;
mod arena;
mod config;
mod stats;

use crate::arena::Arena;
use crate::config::Config;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let report = config.report;
    let arena = Arena::new(config)?;

    let run_result = if report {
        arena.report().map(|reports| {
            info!(strategies = reports.len(), "Call-count report complete");
        })
    } else {
        arena.run().map(|_| ())
    };

    match run_result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Arena failed: {:#}", e);
            Err(e)
        }
    }
}
