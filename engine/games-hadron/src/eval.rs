//! Cutoff heuristics for depth-limited search.
//!
//! Both heuristics reason about move parity. Hadron has no captures and no
//! passes, and the last player able to move wins, so if the remaining legal
//! moves never interfered with each other, the player to move would win
//! exactly when an odd number of moves is left.
//!
//! - [`HadronEvaluator::Parity`] applies that rule to the current legal-move
//!   count.
//! - [`HadronEvaluator::StableParity`] separates *stable* moves (playable
//!   cells whose neighbours are all filled, so they can neither be spoiled
//!   nor spoil anything) from *volatile* ones. With no volatile moves left the
//!   parity read is exact and weighted higher; otherwise a smaller term for
//!   the stable-move parity is added to the overall parity.
//!
//! All values stay far inside the terminal utility range.

use engine_core::{Evaluator, Game};

use crate::board::{Board, Coord, Player};
use crate::legality::is_stable;

/// Magnitude of a parity verdict.
pub const PARITY_WEIGHT: i32 = 1_000;

/// Weight of an exact parity verdict (no volatile moves left).
pub const EXACT_PARITY_WEIGHT: i32 = 4 * PARITY_WEIGHT;

/// Per-stable-move weight of the stable parity term.
pub const STABLE_WEIGHT: i32 = 10;

/// Heuristic position evaluators for Hadron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HadronEvaluator {
    Parity,
    #[default]
    StableParity,
}

impl HadronEvaluator {
    /// Parse a configuration name (`parity` or `stable_parity`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "parity" => Some(Self::Parity),
            "stable_parity" | "stable" => Some(Self::StableParity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parity => "parity",
            Self::StableParity => "stable_parity",
        }
    }
}

/// `+1` if an odd count favours `player`, `-1` otherwise.
fn parity_sign(count: usize, board: &Board, player: Player) -> i32 {
    let mover_wins = count % 2 == 1;
    if mover_wins == (board.to_move() == player) {
        1
    } else {
        -1
    }
}

impl<G> Evaluator<G> for HadronEvaluator
where
    G: Game<State = Board, Move = Coord, Player = Player>,
{
    fn evaluate(&self, game: &G, state: &Board, player: Player) -> i32 {
        if game.is_terminal(state) {
            return game.utility(state, player);
        }

        let moves = game.actions(state);
        match self {
            Self::Parity => PARITY_WEIGHT * parity_sign(moves.len(), state, player),
            Self::StableParity => {
                let stable = moves.iter().filter(|&&mv| is_stable(state, mv)).count();
                let volatile = moves.len() - stable;

                if volatile == 0 {
                    return EXACT_PARITY_WEIGHT * parity_sign(stable, state, player);
                }

                let overall = PARITY_WEIGHT * parity_sign(moves.len(), state, player);
                let tail = if stable == 0 {
                    0
                } else {
                    STABLE_WEIGHT * stable as i32 * parity_sign(stable, state, player)
                };
                overall + tail
            }
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}
