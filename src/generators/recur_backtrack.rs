use rand::rngs::StdRng;

use super::{CarveStyle, carve, choose_direction, unvisited_directions};
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Direction, Grid},
};

pub fn recursive_backtrack(grid: &mut Grid, style: CarveStyle, rng: &mut StdRng, hooks: &mut Hooks) {
    let mut visited = vec![false; grid.len()];

    // Initialize the starting point
    let start = grid.random_cell(rng);
    visited[grid.ravel_index(start)] = true;
    hooks.emit(MazeEvent::CellCarved(start));

    // Each entry remembers the direction it was entered from, which the
    // jagged style needs once we backtrack to it
    let mut stack: Vec<(Coord, Option<Direction>)> = vec![(start, None)];

    while let Some(&(cell, arrival)) = stack.last() {
        if hooks.should_stop() {
            return;
        }
        let choices = unvisited_directions(grid, &visited, cell);
        match choose_direction(&choices, arrival, style, rng) {
            Some(dir) => {
                let Some(next) = grid.adjacent(cell, dir) else {
                    unreachable!("unvisited directions stay on the grid");
                };
                visited[grid.ravel_index(next)] = true;
                carve(grid, cell, next, hooks);
                // Carve the maze in that neighbor's direction
                stack.push((next, Some(dir)));
            }
            None => {
                // Dead end: backtrack
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    /// Counts how often consecutive carved edges keep going in the same direction.
    fn straight_runs(style: CarveStyle) -> usize {
        let mut grid = Grid::new(30, 30).unwrap();
        let mut last: Option<Direction> = None;
        let mut runs = 0;
        let mut count = |event: MazeEvent| {
            if let MazeEvent::EdgeOpened(a, b) = event {
                let dir = Direction::CARDINALS
                    .into_iter()
                    .find(|&d| a.step(d) == Some(b));
                if dir.is_some() && dir == last {
                    runs += 1;
                }
                last = dir;
            }
            std::ops::ControlFlow::Continue(())
        };
        let mut hooks = Hooks::none().with_observer(&mut count);
        recursive_backtrack(&mut grid, style, &mut get_rng(Some(11)), &mut hooks);
        drop(hooks);
        assert_perfect(&grid);
        runs
    }

    #[test]
    fn test_jagged_turns_more() {
        assert!(straight_runs(CarveStyle::Jagged) < straight_runs(CarveStyle::Straight));
    }

    #[test]
    fn test_large_grid_without_recursion() {
        let mut grid = Grid::new(200, 200).unwrap();
        recursive_backtrack(
            &mut grid,
            CarveStyle::Straight,
            &mut get_rng(Some(0)),
            &mut Hooks::none(),
        );
        assert_eq!(grid.open_edge_count(), 200 * 200 - 1);
    }
}
