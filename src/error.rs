use thiserror::Error;

use crate::maze::Coord;

/// Precondition failures reported by the public entry points.
///
/// None of these are raised after a mutation has started. An unreachable goal
/// or a cancelled run is a normal result, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    #[error("maze dimensions must be at least 1x1, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },

    #[error("coordinate {coord} is outside a {height}x{width} maze")]
    OutOfBounds {
        coord: Coord,
        height: usize,
        width: usize,
    },

    #[error("start and goal are the same cell {0}")]
    StartIsGoal(Coord),

    #[error("{name} percentage must be in 0..=100, got {value}")]
    InvalidPercentage { name: &'static str, value: u8 },
}
