//! Move selection strategies.

use rand::prelude::*;
use rand_chacha::ChaCha20Rng;

use crate::error::GameError;
use crate::typed::Game;

/// Chooses a move for the player to move in `state`.
///
/// The returned move must be an element of `game.actions(state)`; the driver
/// rejects anything else with [`GameError::InvalidMove`].
pub trait Strategy<G: Game> {
    /// Name shown in logs and match summaries.
    fn name(&self) -> &str;

    fn choose_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, GameError>;
}

impl<G: Game, S: Strategy<G> + ?Sized> Strategy<G> for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, GameError> {
        (**self).choose_move(game, state)
    }
}

/// Player that selects uniformly among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: ChaCha20Rng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Game> Strategy<G> for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, GameError> {
        let moves = game.actions(state);
        moves
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| GameError::InvalidState("no legal moves to choose from".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Pile;

    #[test]
    fn test_random_player_picks_legal_moves() {
        let game = Pile::new(5);
        let mut player = RandomPlayer::with_seed(1);
        let state = game.initial();
        for _ in 0..20 {
            let mv = player.choose_move(&game, &state).unwrap();
            assert!(game.actions(&state).contains(&mv));
        }
    }

    #[test]
    fn test_random_player_is_seed_deterministic() {
        let game = Pile::new(40);
        let mut a = RandomPlayer::with_seed(99);
        let mut b = RandomPlayer::with_seed(99);

        let mut state = game.initial();
        while !game.is_terminal(&state) {
            let mv_a = a.choose_move(&game, &state).unwrap();
            let mv_b = b.choose_move(&game, &state).unwrap();
            assert_eq!(mv_a, mv_b);
            state = game.apply_unchecked(&state, mv_a);
        }
    }

    #[test]
    fn test_random_player_rejects_terminal_state() {
        let game = Pile::new(0);
        let mut player = RandomPlayer::with_seed(3);
        let err = player.choose_move(&game, &game.initial()).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }
}
