//! Core traits and types for the Hadron game engine
//!
//! This crate provides the abstractions every search engine works against:
//! - `Game`: pure-function game model over immutable states
//! - `Evaluator`: position estimate used at search cutoffs
//! - `Strategy`: move chooser, with `RandomPlayer` as the baseline
//! - `play_game`: turn-driving loop producing a `GameRecord`
//! - `CountingGame`: decorator counting calls made by a search

pub mod counting;
pub mod driver;
pub mod error;
pub mod eval;
pub mod game_utils;
pub mod strategy;
pub mod typed;

// Re-export main types for convenience
pub use counting::{CallCounts, CountingGame};
pub use driver::{play_game, play_game_from, GameRecord, Seat};
pub use error::GameError;
pub use eval::{Evaluator, TerminalEvaluator};
pub use game_utils::{terminal_reward, NEG_INF, POS_INF, WIN_UTILITY};
pub use strategy::{RandomPlayer, Strategy};
pub use typed::Game;

/// Test utilities (internal use only)
#[cfg(test)]
pub(crate) mod test_utils {
    use std::fmt;

    use crate::game_utils::WIN_UTILITY;
    use crate::typed::Game;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Side {
        First,
        Second,
    }

    impl fmt::Display for Side {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Side::First => write!(f, "first"),
                Side::Second => write!(f, "second"),
            }
        }
    }

    /// Take one or two stones per turn; whoever takes the last stone wins.
    #[derive(Debug)]
    pub struct Pile {
        stones: u32,
    }

    impl Pile {
        pub fn new(stones: u32) -> Self {
            Self { stones }
        }
    }

    impl Game for Pile {
        type State = (u32, Side);
        type Move = u32;
        type Player = Side;

        fn initial(&self) -> Self::State {
            (self.stones, Side::First)
        }

        fn to_move(&self, state: &Self::State) -> Side {
            state.1
        }

        fn opponent(&self, player: Side) -> Side {
            match player {
                Side::First => Side::Second,
                Side::Second => Side::First,
            }
        }

        fn actions(&self, state: &Self::State) -> Vec<u32> {
            (1..=state.0.min(2)).collect()
        }

        fn apply_unchecked(&self, state: &Self::State, mv: u32) -> Self::State {
            (state.0 - mv, self.opponent(state.1))
        }

        fn is_terminal(&self, state: &Self::State) -> bool {
            state.0 == 0
        }

        fn utility(&self, state: &Self::State, player: Side) -> i32 {
            if state.0 != 0 {
                0
            } else if player == state.1 {
                -WIN_UTILITY
            } else {
                WIN_UTILITY
            }
        }
    }
}
