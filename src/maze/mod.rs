pub mod cell;
pub mod grid;
pub(crate) mod lattice;

use std::fmt;

pub use cell::{Cell, SearchMarks};
pub use grid::{Glyph, Grid};

/// Row/column position of a cell. Row 0 is the top row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Step one cell in `dir`. Returns `None` on underflow; the upper bound is
    /// checked by the grid.
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (drow, dcol) = dir.delta();
        Some(Coord {
            row: self.row.checked_add_signed(drow)?,
            col: self.col.checked_add_signed(dcol)?,
        })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Axis of a cardinal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A move between neighboring cells. Diagonals are only used by 8-directional
/// solvers; generators and post-processors work on the cardinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    UpRight,
    DownRight,
    DownLeft,
    UpLeft,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
    pub const DIAGONALS: [Direction; 4] = [
        Direction::UpRight,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::UpLeft,
    ];

    /// `(drow, dcol)` of one step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (1, -1),
            Direction::UpLeft => (-1, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpLeft => Direction::DownRight,
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpRight | Direction::DownRight | Direction::DownLeft | Direction::UpLeft
        )
    }

    /// Axis of a cardinal move, `None` for diagonals.
    pub const fn orientation(self) -> Option<Orientation> {
        match self {
            Direction::Up | Direction::Down => Some(Orientation::Vertical),
            Direction::Left | Direction::Right => Some(Orientation::Horizontal),
            _ => None,
        }
    }

    /// The vertical and horizontal cardinals a diagonal is made of.
    pub const fn split(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::UpRight => Some((Direction::Up, Direction::Right)),
            Direction::DownRight => Some((Direction::Down, Direction::Right)),
            Direction::DownLeft => Some((Direction::Down, Direction::Left)),
            Direction::UpLeft => Some((Direction::Up, Direction::Left)),
            _ => None,
        }
    }
}
