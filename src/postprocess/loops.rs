use rand::rngs::StdRng;

use super::{corner_budget, shuffled_walls};
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Grid, lattice},
};

/// Braids the maze: removes up to `percent` of half the Rooms maximum, never
/// completing a fully open 2x2 block. The result gains alternate routes but
/// no chambers.
///
/// Returns the number of walls removed.
pub fn add_loops(grid: &mut Grid, percent: u8, rng: &mut StdRng, hooks: &mut Hooks) -> usize {
    let target = corner_budget(grid, percent, 200);
    if target == 0 {
        return 0;
    }
    let mut opened = 0;
    for (a, b) in shuffled_walls(grid, rng) {
        if opened == target || hooks.should_stop() {
            break;
        }
        if lattice::completes_open_block(grid, a, b) {
            continue;
        }
        grid.open(a, b);
        hooks.emit(MazeEvent::EdgeOpened(a, b));
        opened += 1;
    }
    opened
}
