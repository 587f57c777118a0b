//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! by every Hadron binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`HADRON_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command-line flags of the binaries sit above all three.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! HADRON_<SECTION>_<KEY>=value
//!
//! Examples:
//!     HADRON_BOARD_WIDTH=7
//!     HADRON_ALPHABETA_MAX_DEPTH=3
//!     HADRON_MCTS_ITERATIONS=5000
//!     HADRON_MCTS_ROLLOUT=alphabeta
//!     HADRON_ARENA_GAMES=100
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
