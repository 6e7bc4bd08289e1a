use rand::{Rng, rngs::StdRng};

use super::carve;
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Direction, Grid},
};

/// Frontier cells: unvisited cells next to the carved region. Membership is
/// tracked beside the list so every cell is queued at most once.
struct Frontier {
    cells: Vec<Coord>,
    queued: Vec<bool>,
}

impl Frontier {
    fn new(len: usize) -> Self {
        Frontier {
            cells: Vec::new(),
            queued: vec![false; len],
        }
    }

    /// Queues the unvisited neighbors of `cell`.
    fn extend_around(&mut self, grid: &Grid, visited: &[bool], cell: Coord) {
        for next in Direction::CARDINALS
            .into_iter()
            .filter_map(|dir| grid.adjacent(cell, dir))
        {
            let idx = grid.ravel_index(next);
            if !visited[idx] && !self.queued[idx] {
                self.queued[idx] = true;
                self.cells.push(next);
            }
        }
    }

    fn take_random(&mut self, rng: &mut StdRng) -> Option<Coord> {
        if self.cells.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.cells.len());
        Some(self.cells.swap_remove(idx))
    }
}

pub fn randomized_prim(grid: &mut Grid, rng: &mut StdRng, hooks: &mut Hooks) {
    let mut visited = vec![false; grid.len()];
    let mut frontier = Frontier::new(grid.len());

    let start = grid.random_cell(rng);
    visited[grid.ravel_index(start)] = true;
    hooks.emit(MazeEvent::CellCarved(start));
    frontier.extend_around(grid, &visited, start);

    while !hooks.should_stop() {
        let Some(cell) = frontier.take_random(rng) else {
            break;
        };

        // Every frontier cell touches the carved region
        let carved_neighbors: Vec<Coord> = Direction::CARDINALS
            .into_iter()
            .filter_map(|dir| grid.adjacent(cell, dir))
            .filter(|&n| visited[grid.ravel_index(n)])
            .collect();
        let from = carved_neighbors[rng.random_range(0..carved_neighbors.len())];

        visited[grid.ravel_index(cell)] = true;
        carve(grid, from, cell, hooks);
        frontier.extend_around(grid, &visited, cell);
    }
}
