//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_width() -> usize {
    defaults::board_width()
}
fn d_height() -> usize {
    defaults::board_height()
}
fn d_max_depth() -> u32 {
    defaults::max_depth()
}
fn d_heuristic() -> String {
    defaults::heuristic().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_rollout() -> String {
    defaults::rollout().into()
}
fn d_hybrid_depth() -> u32 {
    defaults::hybrid_depth()
}
fn d_threads() -> usize {
    defaults::threads()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_red() -> String {
    defaults::red().into()
}
fn d_blue() -> String {
    defaults::blue().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct HadronConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub alphabeta: AlphaBetaConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// Base RNG seed; 0 draws one from the OS
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

impl CommonConfig {
    /// The configured seed, or `None` when the OS should provide one.
    pub fn seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}

/// Board dimensions
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(default = "d_width")]
    pub width: usize,
    #[serde(default = "d_height")]
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: defaults::board_width(),
            height: defaults::board_height(),
        }
    }
}

/// Alpha-beta search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Plies searched before the heuristic is applied; 0 searches to the end
    #[serde(default = "d_max_depth")]
    pub max_depth: u32,
    #[serde(default = "d_heuristic")]
    pub heuristic: String,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: defaults::max_depth(),
            heuristic: defaults::heuristic().into(),
        }
    }
}

impl AlphaBetaConfig {
    /// Depth limit, `None` for an exact search.
    pub fn depth_limit(&self) -> Option<u32> {
        (self.max_depth != 0).then_some(self.max_depth)
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// Wall-clock budget per move; 0 uses `iterations` instead
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_rollout")]
    pub rollout: String,
    /// Alpha-beta depth used by each ply of a hybrid rollout
    #[serde(default = "d_hybrid_depth")]
    pub hybrid_depth: u32,
    #[serde(default = "d_threads")]
    pub threads: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            time_budget_ms: defaults::time_budget_ms(),
            exploration: defaults::exploration(),
            rollout: defaults::rollout().into(),
            hybrid_depth: defaults::hybrid_depth(),
            threads: defaults::threads(),
        }
    }
}

/// Match runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "d_games")]
    pub games: u32,
    #[serde(default = "d_red")]
    pub red: String,
    #[serde(default = "d_blue")]
    pub blue: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            red: defaults::red().into(),
            blue: defaults::blue().into(),
        }
    }
}
