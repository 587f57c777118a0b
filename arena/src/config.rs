//! Configuration for the arena
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, HadronConfig};
use games_hadron::HadronEvaluator;
use mcts::{Budget, RolloutPolicy};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::agent::StrategyKind;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<HadronConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_width() -> usize {
    CENTRAL_CONFIG.board.width
}

fn default_height() -> usize {
    CENTRAL_CONFIG.board.height
}

fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_red() -> String {
    CENTRAL_CONFIG.arena.red.clone()
}

fn default_blue() -> String {
    CENTRAL_CONFIG.arena.blue.clone()
}

fn default_max_depth() -> u32 {
    CENTRAL_CONFIG.alphabeta.max_depth
}

fn default_heuristic() -> String {
    CENTRAL_CONFIG.alphabeta.heuristic.clone()
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_budget_ms
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_rollout() -> String {
    CENTRAL_CONFIG.mcts.rollout.clone()
}

fn default_hybrid_depth() -> u32 {
    CENTRAL_CONFIG.mcts.hybrid_depth
}

fn default_threads() -> usize {
    CENTRAL_CONFIG.mcts.threads
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "arena")]
#[command(about = "Hadron arena - pit two strategies against each other")]
#[command(
    long_about = "Plays a series of Hadron games between two strategies and reports
the results. Strategies: random, alphabeta, mcts, hybrid.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Strategy playing Red (moves first)
    #[arg(long, default_value_t = default_red())]
    pub red: String,

    /// Strategy playing Blue
    #[arg(long, default_value_t = default_blue())]
    pub blue: String,

    /// Number of games to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Board width
    #[arg(long, default_value_t = default_width())]
    pub width: usize,

    /// Board height
    #[arg(long, default_value_t = default_height())]
    pub height: usize,

    /// Base RNG seed (0 draws a fresh seed per run)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Alpha-beta lookahead in plies (0 searches to the end of the game)
    #[arg(long, default_value_t = default_max_depth())]
    pub max_depth: u32,

    /// Alpha-beta cutoff heuristic (parity, stable_parity)
    #[arg(long, default_value_t = default_heuristic())]
    pub heuristic: String,

    /// MCTS simulations per move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// MCTS wall-clock budget per move in milliseconds (0 uses --iterations)
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Rollout policy for the `mcts` strategy (random, alphabeta)
    #[arg(long, default_value_t = default_rollout())]
    pub rollout: String,

    /// Alpha-beta depth per rollout ply for hybrid MCTS
    #[arg(long, default_value_t = default_hybrid_depth())]
    pub hybrid_depth: u32,

    /// Root-parallel MCTS trees per move
    #[arg(long, default_value_t = default_threads())]
    pub threads: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Write a JSON stats snapshot here when the match ends
    #[arg(long)]
    pub stats_path: Option<String>,

    /// Run each strategy once from the opening and report game-model call counts
    #[arg(long, default_value_t = false)]
    pub report: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.red_kind()?;
        self.blue_kind()?;

        if self.games == 0 && !self.report {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.width == 0 || self.height == 0 {
            return Err(anyhow!(
                "board must be at least 1x1, got {}x{}",
                self.width,
                self.height
            ));
        }

        self.evaluator()?;
        self.rollout_policy()?;

        if self.iterations == 0 && self.time_budget_ms == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a non-negative number, got {}",
                self.exploration
            ));
        }

        if self.hybrid_depth == 0 {
            return Err(anyhow!("hybrid_depth must be greater than 0"));
        }

        if self.threads == 0 {
            return Err(anyhow!("threads must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn red_kind(&self) -> Result<StrategyKind> {
        self.red.parse()
    }

    pub fn blue_kind(&self) -> Result<StrategyKind> {
        self.blue.parse()
    }

    pub fn evaluator(&self) -> Result<HadronEvaluator> {
        HadronEvaluator::from_name(&self.heuristic).ok_or_else(|| {
            anyhow!(
                "unknown heuristic '{}', expected parity or stable_parity",
                self.heuristic
            )
        })
    }

    /// Rollout policy for the plain `mcts` strategy.
    pub fn rollout_policy(&self) -> Result<RolloutPolicy> {
        RolloutPolicy::from_name(&self.rollout, self.hybrid_depth).ok_or_else(|| {
            anyhow!(
                "unknown rollout '{}', expected random or alphabeta",
                self.rollout
            )
        })
    }

    /// Time budget when set, iteration budget otherwise.
    pub fn budget(&self) -> Budget {
        if self.time_budget_ms > 0 {
            Budget::Time(Duration::from_millis(self.time_budget_ms))
        } else {
            Budget::Iterations(self.iterations)
        }
    }

    /// The configured seed, `None` when every run should differ.
    pub fn seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}
