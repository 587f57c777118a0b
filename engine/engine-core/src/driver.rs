//! Turn-driving loop that plays one game between two strategies.

use tracing::debug;

use crate::error::GameError;
use crate::strategy::Strategy;
use crate::typed::Game;

/// A strategy bound to the player token it moves for.
pub type Seat<'a, G> = (<G as Game>::Player, &'a mut dyn Strategy<G>);

/// Outcome of a finished game.
#[derive(Debug)]
pub struct GameRecord<G: Game> {
    /// Terminal position.
    pub final_state: G::State,
    /// Player who made the last move, `None` if the start position was terminal.
    pub last_mover: Option<G::Player>,
    /// Every move in play order.
    pub moves: Vec<G::Move>,
}

impl<G: Game> GameRecord<G> {
    /// Number of plies played.
    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    /// Player with a positive terminal utility, `None` for a draw.
    pub fn winner(&self, game: &G) -> Option<G::Player> {
        let player = game.to_move(&self.final_state);
        match game.utility(&self.final_state, player).signum() {
            1 => Some(player),
            -1 => Some(game.opponent(player)),
            _ => None,
        }
    }
}

/// Play a game from the initial position until it is terminal.
pub fn play_game<G: Game>(
    game: &G,
    seats: &mut [Seat<'_, G>],
) -> Result<GameRecord<G>, GameError> {
    play_game_from(game, game.initial(), seats)
}

/// Play a game from `state` until it is terminal.
///
/// Each ply asks the seat of the player to move for a move and applies it
/// with [`Game::result`], so an illegal choice surfaces as
/// [`GameError::InvalidMove`] instead of corrupting the game.
pub fn play_game_from<G: Game>(
    game: &G,
    mut state: G::State,
    seats: &mut [Seat<'_, G>],
) -> Result<GameRecord<G>, GameError> {
    let mut moves = Vec::new();
    let mut last_mover = None;

    while !game.is_terminal(&state) {
        let player = game.to_move(&state);
        let strategy = seats
            .iter_mut()
            .find(|(seat, _)| *seat == player)
            .map(|(_, strategy)| strategy)
            .ok_or_else(|| GameError::InvalidState(format!("no strategy seated for {player}")))?;

        let mv = strategy.choose_move(game, &state)?;
        state = game.result(&state, mv)?;

        debug!(
            ply = moves.len() + 1,
            player = %player,
            strategy = strategy.name(),
            mv = %mv,
            "Move played\n{:?}",
            state
        );

        moves.push(mv);
        last_mover = Some(player);
    }

    Ok(GameRecord {
        final_state: state,
        last_mover,
        moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::RandomPlayer;
    use crate::test_utils::{Pile, Side};

    /// Always answers with the same move, legal or not.
    struct Stubborn(u32);

    impl Strategy<Pile> for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn choose_move(&mut self, _game: &Pile, _state: &(u32, Side)) -> Result<u32, GameError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_play_game_last_mover_wins() {
        let game = Pile::new(7);
        let mut first = RandomPlayer::with_seed(1);
        let mut second = RandomPlayer::with_seed(2);

        let record = play_game(
            &game,
            &mut [(Side::First, &mut first), (Side::Second, &mut second)],
        )
        .unwrap();

        assert!(game.is_terminal(&record.final_state));
        let last = record.last_mover.unwrap();
        assert_eq!(record.winner(&game), Some(last));
        assert_eq!(record.moves.iter().sum::<u32>(), 7);
        assert!(record.plies() >= 4 && record.plies() <= 7);
    }

    #[test]
    fn test_play_game_rejects_illegal_move() {
        let game = Pile::new(5);
        let mut first = Stubborn(3);
        let mut second = RandomPlayer::with_seed(2);

        let err = play_game(
            &game,
            &mut [(Side::First, &mut first), (Side::Second, &mut second)],
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidMove(_)));
    }

    #[test]
    fn test_play_game_requires_seat_for_player_to_move() {
        let game = Pile::new(5);
        let mut second = RandomPlayer::with_seed(2);

        let err = play_game(&game, &mut [(Side::Second, &mut second)]).unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }

    #[test]
    fn test_play_game_from_terminal_state() {
        let game = Pile::new(0);
        let mut first = RandomPlayer::with_seed(1);
        let mut second = RandomPlayer::with_seed(2);

        let record = play_game(
            &game,
            &mut [(Side::First, &mut first), (Side::Second, &mut second)],
        )
        .unwrap();
        assert_eq!(record.plies(), 0);
        assert!(record.last_mover.is_none());
    }
}
