//! Typed Game trait shared by every search engine.
//!
//! A game is a set of pure functions over an immutable state value. Engines
//! never mutate a state in place: every move produces a fresh successor, so
//! positions can be kept in search trees, hashed and compared freely.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::error::GameError;

/// Two-player, alternating-move, zero-sum game with a terminal utility.
///
/// # Example
///
/// ```rust
/// # use engine_core::{Game, GameError};
/// /// Take one or two stones; whoever takes the last stone wins.
/// #[derive(Debug)]
/// struct Pile(u32);
///
/// impl Game for Pile {
///     type State = (u32, bool);
///     type Move = u32;
///     type Player = bool;
///
///     fn initial(&self) -> Self::State { (self.0, true) }
///     fn to_move(&self, state: &Self::State) -> bool { state.1 }
///     fn opponent(&self, player: bool) -> bool { !player }
///     fn actions(&self, state: &Self::State) -> Vec<u32> { (1..=state.0.min(2)).collect() }
///     fn apply_unchecked(&self, state: &Self::State, mv: u32) -> Self::State {
///         (state.0 - mv, !state.1)
///     }
///     fn is_terminal(&self, state: &Self::State) -> bool { state.0 == 0 }
///     fn utility(&self, state: &Self::State, player: bool) -> i32 {
///         match (state.0, player == state.1) {
///             (0, true) => -1,
///             (0, false) => 1,
///             _ => 0,
///         }
///     }
/// }
///
/// let game = Pile(3);
/// let next = game.result(&game.initial(), 2).unwrap();
/// assert_eq!(next, (1, false));
/// assert!(game.result(&next, 2).is_err());
/// ```
pub trait Game: Send + Sync + Debug + 'static {
    /// Immutable position value. Equality and hashing identify transpositions.
    type State: Clone + Eq + Hash + Debug + Send + Sync;

    /// A single ply. `Ord` fixes the canonical move order.
    type Move: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync;

    /// Player token.
    type Player: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// The starting position.
    fn initial(&self) -> Self::State;

    /// The player whose turn it is in `state`.
    fn to_move(&self, state: &Self::State) -> Self::Player;

    /// The other player.
    fn opponent(&self, player: Self::Player) -> Self::Player;

    /// Legal moves in ascending move order. Empty for terminal states.
    fn actions(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Apply a move after checking it against [`Game::actions`].
    fn result(&self, state: &Self::State, mv: Self::Move) -> Result<Self::State, GameError> {
        if !self.actions(state).contains(&mv) {
            return Err(GameError::InvalidMove(format!("{mv} is not legal here")));
        }
        Ok(self.apply_unchecked(state, mv))
    }

    /// Apply a move already known to be legal (taken from [`Game::actions`]).
    fn apply_unchecked(&self, state: &Self::State, mv: Self::Move) -> Self::State;

    /// Whether the game is over.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Terminal payoff for `player`. Zero for non-terminal states.
    fn utility(&self, state: &Self::State, player: Self::Player) -> i32;
}
