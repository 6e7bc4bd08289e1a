use std::collections::VecDeque;

use super::SearchStats;
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Grid},
};

/// Unweighted shortest path. Every edge costs 1, so the first time the goal
/// is discovered its path is already shortest and the search stops there.
pub(super) fn solve_bfs(grid: &mut Grid, start: Coord, goal: Coord, hooks: &mut Hooks) -> SearchStats {
    let mut stats = SearchStats::default();
    let mut queue = VecDeque::from([start]);
    {
        let marks = grid.search_mut(start);
        marks.opened = true;
        marks.g = 0.0;
        marks.f = 0.0;
    }
    stats.insertions += 1;
    hooks.emit(MazeEvent::CellOpened(start));

    while let Some(cell) = queue.pop_front() {
        if hooks.should_stop() {
            stats.cancelled = true;
            return stats;
        }
        stats.expanded += 1;
        hooks.emit(MazeEvent::CellExpanded(cell));

        let g = grid[cell].search().g;
        let neighbors: Vec<_> = grid.neighbors4(cell).collect();
        for (dir, next) in neighbors {
            if grid[next].search().opened {
                continue;
            }
            let marks = grid.search_mut(next);
            marks.opened = true;
            marks.g = g + 1.0;
            marks.f = g + 1.0;
            marks.incoming = Some(dir);
            stats.insertions += 1;
            hooks.emit(MazeEvent::CellOpened(next));
            if next == goal {
                stats.found = true;
                return stats;
            }
            queue.push_back(next);
        }
        grid.search_mut(cell).closed = true;
        hooks.emit(MazeEvent::CellClosed(cell));
    }
    stats
}
