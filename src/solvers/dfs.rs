use super::SearchStats;
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Direction, Grid},
};

/// Depth-first walk with an explicit stack.
///
/// A cell is unvisited, tentative (`opened`, on the stack) or a confirmed dead
/// end (`dead_end`, popped). Neither kind of visited cell is entered again, so
/// the stack that survives when the goal is reached is the path.
pub(super) fn solve_dfs(grid: &mut Grid, start: Coord, goal: Coord, hooks: &mut Hooks) -> SearchStats {
    let mut stats = SearchStats::default();
    let mut stack = vec![start];
    open(grid, start, 0.0, None, hooks);
    stats.insertions += 1;
    stats.expanded += 1;

    while let Some(&cell) = stack.last() {
        if hooks.should_stop() {
            stats.cancelled = true;
            return stats;
        }
        if cell == goal {
            stats.found = true;
            return stats;
        }

        let g = grid[cell].search().g;
        let next = grid
            .neighbors4(cell)
            .find(|&(_, n)| !grid[n].search().opened);
        match next {
            Some((dir, n)) => {
                open(grid, n, g + 1.0, Some(dir), hooks);
                stats.insertions += 1;
                stats.expanded += 1;
                stack.push(n);
            }
            None => {
                let marks = grid.search_mut(cell);
                marks.dead_end = true;
                marks.closed = true;
                hooks.emit(MazeEvent::DeadEnd(cell));
                stack.pop();
            }
        }
    }
    stats
}

fn open(grid: &mut Grid, cell: Coord, g: f64, incoming: Option<Direction>, hooks: &mut Hooks) {
    let marks = grid.search_mut(cell);
    marks.opened = true;
    marks.g = g;
    marks.f = g;
    marks.incoming = incoming;
    hooks.emit(MazeEvent::CellOpened(cell));
    hooks.emit(MazeEvent::CellExpanded(cell));
}
