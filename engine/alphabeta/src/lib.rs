//! Minimax search with alpha-beta pruning for games implementing the
//! `engine-core` Game trait.
//!
//! # Variants
//!
//! - **Exact** ([`AlphaBetaConfig::exact`]): every line is searched to the end
//!   of the game and only terminal utilities are compared. Practical for small
//!   boards.
//! - **Heuristic** ([`AlphaBetaConfig::heuristic`]): lines are cut after a fixed
//!   number of plies and scored by an [`Evaluator`](engine_core::Evaluator).
//!
//! # Usage
//!
//! ```rust
//! use alphabeta::{alphabeta_search, AlphaBetaConfig};
//! use engine_core::Game;
//! use games_hadron::{Hadron, HadronEvaluator};
//!
//! let game = Hadron::new(4, 4).unwrap();
//! let result = alphabeta_search(
//!     &game,
//!     &game.initial(),
//!     AlphaBetaConfig::heuristic(2),
//!     &HadronEvaluator::StableParity,
//! )
//! .unwrap();
//! assert!(game.actions(&game.initial()).contains(&result.action));
//! ```

pub mod config;
pub mod player;
pub mod search;

// Re-export main types
pub use config::AlphaBetaConfig;
pub use player::AlphaBetaPlayer;
pub use search::{alphabeta_search, AlphaBetaSearch, SearchResult};
