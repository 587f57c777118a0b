//! Hadron game implementation for the engine
//!
//! Hadron is played on a `width x height` grid. Players alternately place a
//! piece of their colour on an empty cell, and a cell is playable only while
//! its orthogonal neighbours hold equally many Red and Blue pieces. The game
//! ends when no cell is playable; the player who made the last move wins.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_hadron::{Coord, Hadron, Player};
//!
//! let game = Hadron::new(3, 3).unwrap();
//! let board = game.initial();
//! assert_eq!(game.actions(&board).len(), 9);
//!
//! let board = game.result(&board, Coord::new(1, 1)).unwrap();
//! assert_eq!(board.to_move(), Player::Blue);
//! // Cells touching only the red piece are now closed.
//! assert!(!game.actions(&board).contains(&Coord::new(0, 1)));
//! ```

mod board;
mod eval;
mod legality;

pub use board::{Board, Coord, Player, Square};
pub use eval::{HadronEvaluator, EXACT_PARITY_WEIGHT, PARITY_WEIGHT, STABLE_WEIGHT};
pub use legality::{has_legal_move, is_allowable, is_stable, legal_moves};

use engine_core::{Game, GameError};

use crate::board::terminal_utility;

/// The Hadron rules for a fixed board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hadron {
    width: usize,
    height: usize,
}

impl Hadron {
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "board must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Parse a position for this game; see [`Board::from_rows`].
    pub fn position(&self, rows: &[&str], to_move: Player) -> Result<Board, GameError> {
        let board = Board::from_rows(rows, to_move)?;
        if board.width() != self.width || board.height() != self.height {
            return Err(GameError::InvalidConfig(format!(
                "position is {}x{}, game is {}x{}",
                board.width(),
                board.height(),
                self.width,
                self.height
            )));
        }
        Ok(board)
    }
}

impl Game for Hadron {
    type State = Board;
    type Move = Coord;
    type Player = Player;

    fn initial(&self) -> Board {
        Board::empty(self.width, self.height)
    }

    fn to_move(&self, state: &Board) -> Player {
        state.to_move()
    }

    fn opponent(&self, player: Player) -> Player {
        player.other()
    }

    fn actions(&self, state: &Board) -> Vec<Coord> {
        legal_moves(state)
    }

    fn result(&self, state: &Board, mv: Coord) -> Result<Board, GameError> {
        if !is_allowable(state, mv) {
            return Err(GameError::InvalidMove(format!(
                "{mv} is not a legal placement for {}",
                state.to_move()
            )));
        }
        Ok(self.apply_unchecked(state, mv))
    }

    fn apply_unchecked(&self, state: &Board, mv: Coord) -> Board {
        let mover = state.to_move();
        let next = state.place(mv);
        let utility = if has_legal_move(&next) {
            0
        } else {
            terminal_utility(mover)
        };
        next.with_utility(utility)
    }

    fn is_terminal(&self, state: &Board) -> bool {
        state.is_terminal()
    }

    fn utility(&self, state: &Board, player: Player) -> i32 {
        match player {
            Player::Red => state.utility(),
            Player::Blue => -state.utility(),
        }
    }
}
