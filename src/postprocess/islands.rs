use std::collections::{HashSet, VecDeque};

use rand::{rngs::StdRng, seq::SliceRandom};

use super::corner_budget;
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Grid},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IslandReport {
    pub walls_closed: usize,
    pub island_cells: usize,
}

/// Cuts off parts of the maze that the shortest route never uses.
///
/// The current shortest start-goal path is found first and its edges are
/// never touched. Then up to `percent` of half the Rooms maximum other open
/// edges are closed, skipping any closure that would wall a cell in
/// completely. Finally every connected component that holds no cell of that
/// path is flagged as an island.
///
/// When start and goal are already disconnected there is nothing to anchor
/// the islands to and the pass does nothing.
pub fn carve_islands(grid: &mut Grid, percent: u8, rng: &mut StdRng, hooks: &mut Hooks) -> IslandReport {
    let mut report = IslandReport::default();
    let target = corner_budget(grid, percent, 200);
    if target == 0 {
        return report;
    }
    let Some(path) = shortest_path(grid, grid.start(), grid.goal()) else {
        tracing::debug!("[postprocess] goal unreachable, skipping islands");
        return report;
    };
    let path_edges: HashSet<(Coord, Coord)> = path
        .windows(2)
        .map(|pair| ordered(pair[0], pair[1]))
        .collect();

    let mut candidates: Vec<(Coord, Coord)> = grid
        .edges()
        .filter(|&(a, b)| grid.is_open(a, b) && !path_edges.contains(&(a, b)))
        .collect();
    candidates.shuffle(rng);

    for (a, b) in candidates {
        if report.walls_closed == target || hooks.should_stop() {
            break;
        }
        if grid.neighbors4(a).count() <= 1 || grid.neighbors4(b).count() <= 1 {
            continue;
        }
        grid.close(a, b);
        hooks.emit(MazeEvent::EdgeClosed(a, b));
        report.walls_closed += 1;
    }

    report.island_cells = mark_islands(grid, &path, hooks);
    report
}

fn ordered(a: Coord, b: Coord) -> (Coord, Coord) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Plain BFS over open edges. Ties are broken by the fixed neighbor order, so
/// the same maze always yields the same path.
pub(crate) fn shortest_path(grid: &Grid, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
    let mut parent: Vec<Option<Coord>> = vec![None; grid.len()];
    let mut seen = vec![false; grid.len()];
    seen[grid.ravel_index(start)] = true;
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            let mut path = vec![goal];
            let mut current = goal;
            while let Some(prev) = parent[grid.ravel_index(current)] {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            return Some(path);
        }
        for (_, next) in grid.neighbors4(cell) {
            let idx = grid.ravel_index(next);
            if !seen[idx] {
                seen[idx] = true;
                parent[idx] = Some(cell);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Flags every component that holds no path cell, one whole component at a
/// time, so a stop between components leaves no half-marked region.
/// Returns the number of flagged cells.
fn mark_islands(grid: &mut Grid, path: &[Coord], hooks: &mut Hooks) -> usize {
    let mut seen = vec![false; grid.len()];
    for cell in grid.coords() {
        grid.set_island(cell, false);
    }
    for &cell in path {
        if !seen[grid.ravel_index(cell)] {
            flood(grid, cell, &mut seen);
        }
    }

    let mut marked = 0;
    for seed in grid.coords() {
        if seen[grid.ravel_index(seed)] || grid[seed].is_obstacle() {
            continue;
        }
        if hooks.should_stop() {
            break;
        }
        for cell in flood(grid, seed, &mut seen) {
            grid.set_island(cell, true);
            hooks.emit(MazeEvent::IslandMarked(cell));
            marked += 1;
        }
    }
    marked
}

/// Collects the cells reachable from `seed` that are not yet `seen`.
fn flood(grid: &Grid, seed: Coord, seen: &mut [bool]) -> Vec<Coord> {
    seen[grid.ravel_index(seed)] = true;
    let mut cells = vec![seed];
    let mut queue = VecDeque::from([seed]);
    while let Some(cell) = queue.pop_front() {
        for (_, next) in grid.neighbors4(cell) {
            let idx = grid.ravel_index(next);
            if !seen[idx] {
                seen[idx] = true;
                cells.push(next);
                queue.push_back(next);
            }
        }
    }
    cells
}
