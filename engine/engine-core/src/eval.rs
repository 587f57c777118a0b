//! Position evaluators used at search cutoffs.

use crate::typed::Game;

/// Estimates the value of a non-terminal position for `player`.
///
/// Values must stay strictly inside the terminal utility range so a
/// heuristic guess never outranks a proven result.
pub trait Evaluator<G: Game>: Send + Sync {
    fn evaluate(&self, game: &G, state: &G::State, player: G::Player) -> i32;

    /// Short name used in logs and reports.
    fn name(&self) -> &str {
        "evaluator"
    }
}

/// Scores every position by its terminal utility (zero until the game ends).
///
/// Useful as a neutral default for exact searches, where the cutoff is never
/// reached, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalEvaluator;

impl TerminalEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Game> Evaluator<G> for TerminalEvaluator {
    fn evaluate(&self, game: &G, state: &G::State, player: G::Player) -> i32 {
        game.utility(state, player)
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

impl<G: Game, E: Evaluator<G> + ?Sized> Evaluator<G> for &E {
    fn evaluate(&self, game: &G, state: &G::State, player: G::Player) -> i32 {
        (**self).evaluate(game, state, player)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
