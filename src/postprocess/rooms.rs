use rand::rngs::StdRng;

use super::{corner_budget, shuffled_walls};
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Grid, lattice},
};

/// Knocks out walls to open chambers. Up to `percent` of
/// `(height - 1) * (width - 1)` walls are removed. A removal is skipped when
/// some wall at either end of it would no longer reach the border through
/// other walls, so every wall stays attached. Open 2x2 blocks are allowed here.
///
/// Returns the number of walls removed.
pub fn add_rooms(grid: &mut Grid, percent: u8, rng: &mut StdRng, hooks: &mut Hooks) -> usize {
    let target = corner_budget(grid, percent, 100);
    if target == 0 {
        return 0;
    }
    let mut opened = 0;
    for (a, b) in shuffled_walls(grid, rng) {
        if opened == target || hooks.should_stop() {
            break;
        }
        if lattice::detaches_walls(grid, a, b) {
            continue;
        }
        grid.open(a, b);
        hooks.emit(MazeEvent::EdgeOpened(a, b));
        opened += 1;
    }
    opened
}
