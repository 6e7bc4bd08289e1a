//! Transforms applied to a carved maze: rooms, loops, islands and obstacles.
//!
//! Every pass takes a percentage in `0..=100`, does nothing at 0, consumes the
//! shared maze RNG for its random order and stops between edits when the hooks
//! ask it to.

mod islands;
mod loops;
mod obstacles;
mod rooms;

pub use islands::{IslandReport, carve_islands};
pub use loops::add_loops;
pub use obstacles::place_obstacles;
pub use rooms::add_rooms;

use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    config::MazeParams,
    events::Hooks,
    maze::{Coord, Grid},
};

/// What the passes of [`apply_all`] changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PostProcessReport {
    pub rooms_opened: usize,
    pub loops_opened: usize,
    pub island_walls_closed: usize,
    pub island_cells: usize,
    pub obstacles_placed: usize,
}

/// Runs the passes requested by `params` in order: rooms, loops, islands,
/// obstacles. Obstacles go last so that the island pass sees the maze before
/// any cell is blocked.
pub fn apply_all(
    grid: &mut Grid,
    params: &MazeParams,
    rng: &mut StdRng,
    hooks: &mut Hooks,
) -> PostProcessReport {
    let mut report = PostProcessReport {
        rooms_opened: add_rooms(grid, params.rooms, rng, hooks),
        ..Default::default()
    };
    report.loops_opened = add_loops(grid, params.loops, rng, hooks);
    let islands = carve_islands(grid, params.islands, rng, hooks);
    report.island_walls_closed = islands.walls_closed;
    report.island_cells = islands.island_cells;
    report.obstacles_placed = place_obstacles(grid, params.obstacles, rng, hooks);
    tracing::debug!("[postprocess] {:?}", report);
    report
}

/// `percent` of `(height - 1) * (width - 1) / divisor`, the interior-corner
/// budget the wall passes are sized against.
fn corner_budget(grid: &Grid, percent: u8, divisor: usize) -> usize {
    let corners = (grid.height() - 1) * (grid.width() - 1);
    corners * percent.min(100) as usize / divisor
}

/// Closed edges between two non-obstacle cells, in random order.
fn shuffled_walls(grid: &Grid, rng: &mut StdRng) -> Vec<(Coord, Coord)> {
    let mut walls: Vec<(Coord, Coord)> = grid
        .edges()
        .filter(|&(a, b)| !grid.is_open(a, b) && !grid[a].is_obstacle() && !grid[b].is_obstacle())
        .collect();
    walls.shuffle(rng);
    walls
}
