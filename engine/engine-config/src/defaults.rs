//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the documented defaults file and the binaries can never disagree.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    board: BoardDefaults,
    alphabeta: AlphaBetaDefaults,
    mcts: MctsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct BoardDefaults {
    width: usize,
    height: usize,
}

#[derive(Debug, Deserialize)]
struct AlphaBetaDefaults {
    max_depth: u32,
    heuristic: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    time_budget_ms: u64,
    exploration: f64,
    rollout: String,
    hybrid_depth: u32,
    threads: usize,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    red: String,
    blue: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Board
pub fn board_width() -> usize {
    DEFAULTS.board.width
}
pub fn board_height() -> usize {
    DEFAULTS.board.height
}

// Alpha-beta
pub fn max_depth() -> u32 {
    DEFAULTS.alphabeta.max_depth
}
pub fn heuristic() -> &'static str {
    &DEFAULTS.alphabeta.heuristic
}

// MCTS
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn time_budget_ms() -> u64 {
    DEFAULTS.mcts.time_budget_ms
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn rollout() -> &'static str {
    &DEFAULTS.mcts.rollout
}
pub fn hybrid_depth() -> u32 {
    DEFAULTS.mcts.hybrid_depth
}
pub fn threads() -> usize {
    DEFAULTS.mcts.threads
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn red() -> &'static str {
    &DEFAULTS.arena.red
}
pub fn blue() -> &'static str {
    &DEFAULTS.arena.blue
}
