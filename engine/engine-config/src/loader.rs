//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::HadronConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "HADRON_CONFIG";

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the HADRON_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> HadronConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_PATH_ENV, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_PATH_ENV,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(HadronConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> HadronConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(HadronConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(HadronConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(raw) = std::env::var($key) {
            match raw.parse() {
                Ok(v) => $config.$section.$field = v,
                Err(_) => warn!("Ignoring {}={}: not a valid value", $key, raw),
            }
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: HADRON_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: HadronConfig) -> HadronConfig {
    // Common
    env_override!(config, common.log_level, "HADRON_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "HADRON_COMMON_SEED", parse);

    // Board
    env_override!(config, board.width, "HADRON_BOARD_WIDTH", parse);
    env_override!(config, board.height, "HADRON_BOARD_HEIGHT", parse);

    // Alpha-beta
    env_override!(
        config,
        alphabeta.max_depth,
        "HADRON_ALPHABETA_MAX_DEPTH",
        parse
    );
    env_override!(config, alphabeta.heuristic, "HADRON_ALPHABETA_HEURISTIC");

    // MCTS
    env_override!(config, mcts.iterations, "HADRON_MCTS_ITERATIONS", parse);
    env_override!(
        config,
        mcts.time_budget_ms,
        "HADRON_MCTS_TIME_BUDGET_MS",
        parse
    );
    env_override!(config, mcts.exploration, "HADRON_MCTS_EXPLORATION", parse);
    env_override!(config, mcts.rollout, "HADRON_MCTS_ROLLOUT");
    env_override!(
        config,
        mcts.hybrid_depth,
        "HADRON_MCTS_HYBRID_DEPTH",
        parse
    );
    env_override!(config, mcts.threads, "HADRON_MCTS_THREADS", parse);

    // Arena
    env_override!(config, arena.games, "HADRON_ARENA_GAMES", parse);
    env_override!(config, arena.red, "HADRON_ARENA_RED");
    env_override!(config, arena.blue, "HADRON_ARENA_BLUE");

    config
}
