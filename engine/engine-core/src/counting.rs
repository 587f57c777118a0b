//! Instrumented game wrapper that counts calls made by a search.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::GameError;
use crate::typed::Game;

/// Snapshot of call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub actions: u64,
    /// Successor states produced, checked or not.
    pub result: u64,
    pub is_terminal: u64,
    pub utility: u64,
}

impl fmt::Display for CallCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result states: {:>9}; Terminal tests: {:>9}; Move lists: {:>9}",
            self.result, self.is_terminal, self.actions
        )
    }
}

/// Forwards every [`Game`] call to the wrapped game and counts it.
///
/// Counters are atomic, so a wrapped game can still be shared between
/// search threads.
#[derive(Debug)]
pub struct CountingGame<G: Game> {
    inner: G,
    actions: AtomicU64,
    result: AtomicU64,
    is_terminal: AtomicU64,
    utility: AtomicU64,
}

impl<G: Game> CountingGame<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            actions: AtomicU64::new(0),
            result: AtomicU64::new(0),
            is_terminal: AtomicU64::new(0),
            utility: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn counts(&self) -> CallCounts {
        CallCounts {
            actions: self.actions.load(Ordering::Relaxed),
            result: self.result.load(Ordering::Relaxed),
            is_terminal: self.is_terminal.load(Ordering::Relaxed),
            utility: self.utility.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.actions.store(0, Ordering::Relaxed);
        self.result.store(0, Ordering::Relaxed);
        self.is_terminal.store(0, Ordering::Relaxed);
        self.utility.store(0, Ordering::Relaxed);
    }
}

impl<G: Game> Game for CountingGame<G> {
    type State = G::State;
    type Move = G::Move;
    type Player = G::Player;

    fn initial(&self) -> Self::State {
        self.inner.initial()
    }

    fn to_move(&self, state: &Self::State) -> Self::Player {
        self.inner.to_move(state)
    }

    fn opponent(&self, player: Self::Player) -> Self::Player {
        self.inner.opponent(player)
    }

    fn actions(&self, state: &Self::State) -> Vec<Self::Move> {
        self.actions.fetch_add(1, Ordering::Relaxed);
        self.inner.actions(state)
    }

    fn result(&self, state: &Self::State, mv: Self::Move) -> Result<Self::State, GameError> {
        self.result.fetch_add(1, Ordering::Relaxed);
        self.inner.result(state, mv)
    }

    fn apply_unchecked(&self, state: &Self::State, mv: Self::Move) -> Self::State {
        self.result.fetch_add(1, Ordering::Relaxed);
        self.inner.apply_unchecked(state, mv)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        self.is_terminal.fetch_add(1, Ordering::Relaxed);
        self.inner.is_terminal(state)
    }

    fn utility(&self, state: &Self::State, player: Self::Player) -> i32 {
        self.utility.fetch_add(1, Ordering::Relaxed);
        self.inner.utility(state, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Pile, Side};

    #[test]
    fn test_counts_forwarded_calls() {
        let game = CountingGame::new(Pile::new(4));
        let state = game.initial();

        let moves = game.actions(&state);
        let next = game.result(&state, moves[0]).unwrap();
        let next = game.apply_unchecked(&next, 1);
        assert!(!game.is_terminal(&next));
        assert_eq!(game.utility(&next, Side::First), 0);

        let counts = game.counts();
        assert_eq!(counts.actions, 1);
        assert_eq!(counts.result, 2);
        assert_eq!(counts.is_terminal, 1);
        assert_eq!(counts.utility, 1);
    }

    #[test]
    fn test_checked_result_forwards_errors() {
        let game = CountingGame::new(Pile::new(1));
        let err = game.result(&game.initial(), 2).unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(_)));
        assert_eq!(game.counts().result, 1);
    }

    #[test]
    fn test_reset_clears_counts() {
        let game = CountingGame::new(Pile::new(4));
        game.actions(&game.initial());
        game.reset();
        assert_eq!(game.counts(), CallCounts::default());
    }

    #[test]
    fn test_display_lists_counts() {
        let counts = CallCounts {
            actions: 3,
            result: 12,
            is_terminal: 40,
            utility: 2,
        };
        let text = counts.to_string();
        assert!(text.starts_with("Result states:"));
        assert!(text.contains(" 12;"));
        assert!(text.contains(" 40;"));
    }
}
