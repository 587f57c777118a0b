//! Monte Carlo Tree Search (MCTS) for games implementing the `engine-core`
//! Game trait.
//!
//! # Overview
//!
//! MCTS builds a search tree by running simulations. Each simulation consists
//! of four phases:
//!
//! 1. **Selection**: descend through fully expanded nodes using UCB1 to
//!    balance exploration and exploitation
//! 2. **Expansion**: add one child for an untried move picked at random
//! 3. **Simulation**: play the new position out, either with uniformly random
//!    moves or with a shallow alpha-beta search choosing every ply
//! 4. **Backpropagation**: update visit counts and reward sums along the
//!    path from leaf to root
//!
//! The move returned is the robust child: the root move with the most visits.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, TerminalEvaluator};
//! use games_hadron::Hadron;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = Hadron::new(4, 4).unwrap();
//! let root = game.initial();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(
//!     &game,
//!     &root,
//!     MctsConfig::for_testing(),
//!     &TerminalEvaluator,
//!     &mut rng,
//! )
//! .unwrap();
//!
//! assert!(game.actions(&root).contains(&result.action));
//! assert_eq!(result.simulations, 200);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `budget`: iterations or wall-clock time per search
//! - `exploration`: UCB1 constant (default: sqrt 2)
//! - `rollout`: [`RolloutPolicy::Random`] or [`RolloutPolicy::AlphaBeta`]
//! - `threads`: independent root-parallel trees (default: 1)
//! - `seed`: RNG seed for [`MctsPlayer`]

pub mod config;
pub mod node;
pub mod player;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{Budget, MctsConfig, RolloutPolicy};
pub use node::{MctsNode, NodeId};
pub use player::MctsPlayer;
pub use rollout::Rollout;
pub use search::{
    run_mcts, run_mcts_with_stats, run_root_parallel, MctsSearch, SearchResult, SearchStats,
};
pub use tree::{robust_child, ChildStats, MctsTree, TreeStats};
