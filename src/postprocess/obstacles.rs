use rand::{rngs::StdRng, seq::SliceRandom};

use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Grid},
};

/// Blocks `percent` of the cells other than start and goal. Each obstacle loses
/// all four edges, so the maze may split into disconnected parts.
///
/// Returns the number of obstacles placed.
pub fn place_obstacles(grid: &mut Grid, percent: u8, rng: &mut StdRng, hooks: &mut Hooks) -> usize {
    let (start, goal) = (grid.start(), grid.goal());
    let eligible = grid.len().saturating_sub(2);
    let target = eligible * percent.min(100) as usize / 100;
    if target == 0 {
        return 0;
    }

    let mut candidates: Vec<Coord> = grid
        .coords()
        .filter(|&c| c != start && c != goal && !grid[c].is_obstacle())
        .collect();
    candidates.shuffle(rng);

    let mut placed = 0;
    for cell in candidates.into_iter().take(target) {
        if hooks.should_stop() {
            break;
        }
        for neighbor in grid.set_obstacle(cell) {
            hooks.emit(MazeEvent::EdgeClosed(cell, neighbor));
        }
        hooks.emit(MazeEvent::ObstaclePlaced(cell));
        placed += 1;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;
    use std::ops::ControlFlow;

    #[test]
    fn test_obstacles_skip_endpoints() {
        let mut grid = Grid::new(3, 3).unwrap();
        for (a, b) in grid.edges().collect::<Vec<_>>() {
            grid.open(a, b);
        }
        let placed = place_obstacles(&mut grid, 100, &mut get_rng(Some(0)), &mut Hooks::none());
        assert_eq!(placed, 7);
        assert!(!grid[grid.start()].is_obstacle());
        assert!(!grid[grid.goal()].is_obstacle());
        assert_eq!(grid.open_edge_count(), 0);
    }

    #[test]
    fn test_obstacle_fraction() {
        let mut grid = Grid::new(10, 10).unwrap();
        let placed = place_obstacles(&mut grid, 25, &mut get_rng(Some(0)), &mut Hooks::none());
        assert_eq!(placed, 98 * 25 / 100);
        assert_eq!(grid.coords().filter(|&c| grid[c].is_obstacle()).count(), placed);
    }

    #[test]
    fn test_obstacles_stop_partway() {
        let mut grid = Grid::new(6, 6).unwrap();
        for (a, b) in grid.edges().collect::<Vec<_>>() {
            grid.open(a, b);
        }
        let mut seen = 0;
        let mut observer = |event: MazeEvent| {
            if let MazeEvent::ObstaclePlaced(_) = event {
                seen += 1;
                if seen == 3 {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        };
        let mut hooks = Hooks::none().with_observer(&mut observer);
        let placed = place_obstacles(&mut grid, 50, &mut get_rng(Some(1)), &mut hooks);
        assert_eq!(placed, 3);
        let obstacles: Vec<Coord> = grid.coords().filter(|&c| grid[c].is_obstacle()).collect();
        assert_eq!(obstacles.len(), 3);
        for (a, b) in grid.open_edges() {
            assert!(!obstacles.contains(&a) && !obstacles.contains(&b));
        }
    }
}
