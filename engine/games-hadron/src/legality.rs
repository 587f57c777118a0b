//! Placement rule: an empty cell is playable when its on-board orthogonal
//! neighbours hold as many Red pieces as Blue pieces.

use crate::board::{Board, Coord, Player, Square};

/// Whether a piece may be placed on `coord`.
///
/// Occupied and off-board cells are never playable. Legality does not depend
/// on which player is about to move.
pub fn is_allowable(board: &Board, coord: Coord) -> bool {
    if board.get(coord) != Square::Empty {
        return false;
    }

    let (mut red, mut blue) = (0u8, 0u8);
    for neighbor in board.neighbors(coord) {
        match board.get(neighbor) {
            Square::Occupied(Player::Red) => red += 1,
            Square::Occupied(Player::Blue) => blue += 1,
            Square::Empty | Square::OffBoard => {}
        }
    }
    red == blue
}

/// All playable cells in ascending `(x, y)` order.
pub fn legal_moves(board: &Board) -> Vec<Coord> {
    board
        .coords()
        .filter(|&coord| is_allowable(board, coord))
        .collect()
}

/// Cheaper than `!legal_moves(board).is_empty()`: stops at the first hit.
pub fn has_legal_move(board: &Board) -> bool {
    board.coords().any(|coord| is_allowable(board, coord))
}

/// A playable cell whose neighbours are all filled.
///
/// No later placement can change its neighbour counts, so it stays playable
/// until taken, and taking it cannot change any other cell's legality.
pub fn is_stable(board: &Board, coord: Coord) -> bool {
    is_allowable(board, coord)
        && board
            .neighbors(coord)
            .all(|neighbor| matches!(board.get(neighbor), Square::Occupied(_)))
}
