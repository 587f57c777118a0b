//! Immutable Hadron board value.

use std::fmt;
use std::hash::{Hash, Hasher};

use engine_core::{GameError, WIN_UTILITY};

use crate::legality::has_legal_move;

/// Player token. Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// The player who opens every game.
    pub const FIRST: Player = Player::Red;

    pub fn other(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'R',
            Player::Blue => 'B',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Board coordinate: `x` is the column, `y` the row.
///
/// The derived ordering is `(x, y)` lexicographic, which is the canonical
/// move order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Contents of a board location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Empty,
    Occupied(Player),
    /// Outside `[0, width) x [0, height)`.
    OffBoard,
}

impl Square {
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(player) => player.symbol(),
            Square::OffBoard => '#',
        }
    }
}

/// A position: occupied cells, the player to move and the cached terminal
/// utility (from Red's point of view).
///
/// Boards are never mutated once built; [`Board::place`] returns a copy.
/// Equality and hashing cover dimensions, cells and the player to move, not
/// the cached utility, which is a function of the other three.
#[derive(Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Player>>,
    to_move: Player,
    utility: i32,
}

impl Board {
    /// Empty board with Red to move.
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "board must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self::empty(width, height))
    }

    pub(crate) fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            to_move: Player::FIRST,
            utility: 0,
        }
    }

    /// Parse a position from text rows (`R`, `B` and `.`), top row first.
    ///
    /// The cached utility is recomputed: if no legal move remains, the player
    /// who is *not* `to_move` is taken to have made the last move.
    ///
    /// ```
    /// use games_hadron::{Board, Player, Square, Coord};
    ///
    /// let board = Board::from_rows(&["R.B", "...", "..."], Player::Red).unwrap();
    /// assert_eq!(board.get(Coord::new(2, 0)), Square::Occupied(Player::Blue));
    /// assert_eq!(board.occupied(), 2);
    /// ```
    pub fn from_rows(rows: &[&str], to_move: Player) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut board = Self::new(width, height)?;
        board.to_move = to_move;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GameError::InvalidConfig(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    'R' | 'r' => Some(Player::Red),
                    'B' | 'b' => Some(Player::Blue),
                    other => {
                        return Err(GameError::InvalidConfig(format!(
                            "unexpected cell '{other}' at ({x}, {y})"
                        )))
                    }
                };
                board.cells[y * width + x] = cell;
            }
        }

        if !has_legal_move(&board) {
            board.utility = terminal_utility(to_move.other());
        }
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Cached utility from Red's point of view: 0 while the game is running.
    pub fn utility(&self) -> i32 {
        self.utility
    }

    pub fn is_terminal(&self) -> bool {
        self.utility != 0
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    pub fn get(&self, coord: Coord) -> Square {
        if !self.contains(coord) {
            return Square::OffBoard;
        }
        match self.cells[self.index(coord)] {
            Some(player) => Square::Occupied(player),
            None => Square::Empty,
        }
    }

    /// Signed lookup, so neighbours of edge cells read as off-board.
    pub fn square(&self, x: i64, y: i64) -> Square {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(x), Ok(y)) => self.get(Coord::new(x, y)),
            _ => Square::OffBoard,
        }
    }

    /// Orthogonal neighbours of `coord` that lie on the board.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        const STEPS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        STEPS.into_iter().filter_map(move |(dx, dy)| {
            let x = usize::try_from(coord.x as i64 + dx).ok()?;
            let y = usize::try_from(coord.y as i64 + dy).ok()?;
            let next = Coord::new(x, y);
            self.contains(next).then_some(next)
        })
    }

    /// Every on-board coordinate in `(x, y)` order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let height = self.height;
        (0..self.width).flat_map(move |x| (0..height).map(move |y| Coord::new(x, y)))
    }

    /// Copy of this board with `coord` taken by the player to move and the
    /// turn passed. The cached utility is cleared.
    pub(crate) fn place(&self, coord: Coord) -> Board {
        let mut cells = self.cells.clone();
        cells[self.index(coord)] = Some(self.to_move);
        Board {
            width: self.width,
            height: self.height,
            cells,
            to_move: self.to_move.other(),
            utility: 0,
        }
    }

    pub(crate) fn with_utility(mut self, utility: i32) -> Board {
        self.utility = utility;
        self
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.y * self.width + coord.x
    }
}

/// Utility (Red's view) of a finished game whose last move was by `last_mover`.
pub(crate) fn terminal_utility(last_mover: Player) -> i32 {
    match last_mover {
        Player::Red => WIN_UTILITY,
        Player::Blue => -WIN_UTILITY,
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.to_move == other.to_move
            && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.to_move.hash(state);
        self.cells.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for x in 0..self.width {
            write!(f, " {x}")?;
        }
        writeln!(f)?;
        for y in 0..self.height {
            write!(f, "{y:<2}")?;
            for x in 0..self.width {
                write!(f, " {}", self.get(Coord::new(x, y)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {}x{} to_move={} utility={}",
            self.width, self.height, self.to_move, self.utility
        )?;
        write!(f, "{self}")
    }
}
