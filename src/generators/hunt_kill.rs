use rand::{Rng, rngs::StdRng};

use super::{CarveStyle, carve, choose_direction, unvisited_directions};
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Direction, Grid},
};

pub fn hunt_and_kill(grid: &mut Grid, style: CarveStyle, rng: &mut StdRng, hooks: &mut Hooks) {
    let mut visited = vec![false; grid.len()];

    let start = grid.random_cell(rng);
    visited[grid.ravel_index(start)] = true;
    hooks.emit(MazeEvent::CellCarved(start));

    // Rows above this one are fully visited, so hunting starts here
    let mut hunt_row = 0;
    let mut walker = Some((start, None));

    loop {
        // Kill: random walk until the walker is boxed in
        while let Some((cell, arrival)) = walker {
            if hooks.should_stop() {
                return;
            }
            let choices = unvisited_directions(grid, &visited, cell);
            walker = choose_direction(&choices, arrival, style, rng).and_then(|dir| {
                let next = grid.adjacent(cell, dir)?;
                visited[grid.ravel_index(next)] = true;
                carve(grid, cell, next, hooks);
                Some((next, Some(dir)))
            });
        }

        // Hunt: first unvisited cell bordering the carved region
        walker = match hunt(grid, &mut visited, &mut hunt_row, rng, hooks) {
            Some(found) => Some(found),
            None => return,
        };
    }
}

/// Scans rows from `hunt_row` for the first unvisited cell with a visited
/// neighbor and carves into it from a random such neighbor. Returns the cell
/// and the direction it was entered from.
fn hunt(
    grid: &mut Grid,
    visited: &mut [bool],
    hunt_row: &mut usize,
    rng: &mut StdRng,
    hooks: &mut Hooks,
) -> Option<(Coord, Option<Direction>)> {
    let width = grid.width();
    for row in *hunt_row..grid.height() {
        if hooks.should_stop() {
            return None;
        }
        let mut row_done = true;
        for col in 0..width {
            let cell = Coord::new(row, col);
            if visited[grid.ravel_index(cell)] {
                continue;
            }
            let entries: Vec<Direction> = Direction::CARDINALS
                .into_iter()
                .filter(|&dir| {
                    grid.adjacent(cell, dir)
                        .is_some_and(|n| visited[grid.ravel_index(n)])
                })
                .collect();
            if entries.is_empty() {
                row_done = false;
                continue;
            }
            let towards_visited = entries[rng.random_range(0..entries.len())];
            let from = grid.adjacent(cell, towards_visited)?;
            visited[grid.ravel_index(cell)] = true;
            carve(grid, from, cell, hooks);
            return Some((cell, Some(towards_visited.opposite())));
        }
        if row_done && row == *hunt_row {
            *hunt_row = row + 1;
        }
    }
    None
}
