mod best_first;
mod bfs;
mod dfs;
pub mod frontier;
pub mod heuristic;

use std::f64::consts::SQRT_2;

use crate::{
    error::MazeError,
    events::{Hooks, MazeEvent},
    maze::{Coord, Direction, Grid},
};
use best_first::{Keying, solve_best_first};
use bfs::solve_bfs;
use dfs::solve_dfs;
pub use frontier::{Frontier, PriorityKey};
pub use heuristic::{Heuristic, HeuristicKind, TieBreak};

/// Which moves a solver may take.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    #[default]
    Four,
    /// Diagonals allowed, each costing 1.
    EightUniform,
    /// Diagonals allowed, each costing sqrt 2.
    EightOctile,
}

impl Movement {
    pub fn neighbors(self, grid: &Grid, cell: Coord) -> Vec<(Direction, Coord)> {
        match self {
            Movement::Four => grid.neighbors4(cell).collect(),
            Movement::EightUniform | Movement::EightOctile => grid.neighbors8(cell).collect(),
        }
    }

    pub fn step_cost(self, dir: Direction) -> f64 {
        match (self, dir.is_diagonal()) {
            (Movement::EightOctile, true) => SQRT_2,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
    Dijkstra,
    GreedyBestFirst(Movement),
    AStar(Heuristic),
}

impl Solver {
    /// The variants a host would normally offer.
    pub const ALL: [Solver; 11] = [
        Solver::Dfs,
        Solver::Bfs,
        Solver::Dijkstra,
        Solver::GreedyBestFirst(Movement::Four),
        Solver::GreedyBestFirst(Movement::EightOctile),
        Solver::AStar(Heuristic::plain(HeuristicKind::Manhattan)),
        Solver::AStar(Heuristic::new(HeuristicKind::Manhattan, TieBreak::CrossProduct)),
        Solver::AStar(Heuristic::new(HeuristicKind::Manhattan, TieBreak::SecondaryKey)),
        Solver::AStar(Heuristic::plain(HeuristicKind::ManhattanEuclidean)),
        Solver::AStar(Heuristic::plain(HeuristicKind::Chebyshev)),
        Solver::AStar(Heuristic::plain(HeuristicKind::Octile)),
    ];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::GreedyBestFirst(Movement::Four) => write!(f, "Greedy Best-First Search"),
            Solver::GreedyBestFirst(_) => write!(f, "Greedy Best-First Search (8-way)"),
            Solver::AStar(heuristic) => write!(f, "A* ({heuristic})"),
        }
    }
}

/// One cell of a found path and the direction it was entered from (`None` for
/// the start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub cell: Coord,
    pub incoming: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub reachable: bool,
    /// Number of moves on the path; 0 when unreachable.
    pub path_length: usize,
    /// Sum of step costs on the path; differs from `path_length` only with
    /// octile diagonals.
    pub path_cost: f64,
    pub expanded_count: usize,
    pub frontier_insertions: usize,
    /// The run was stopped through the hooks before it could finish.
    pub cancelled: bool,
    pub path: Vec<PathStep>,
}

/// Counters a search hands back to [`finish`].
#[derive(Debug, Default, Clone, Copy)]
struct SearchStats {
    found: bool,
    cancelled: bool,
    expanded: usize,
    insertions: usize,
}

/// Validates the endpoints, clears old search marks and runs `solver` from
/// `grid.start()` to `grid.goal()`.
pub fn solve_maze(grid: &mut Grid, solver: Solver, hooks: &mut Hooks) -> Result<SolveResult, MazeError> {
    let (start, goal) = (grid.start(), grid.goal());
    grid.check_bounds(start)?;
    grid.check_bounds(goal)?;
    if start == goal {
        return Err(MazeError::StartIsGoal(start));
    }

    grid.reset_search();
    let stats = match solver {
        Solver::Dfs => solve_dfs(grid, start, goal, hooks),
        Solver::Bfs => solve_bfs(grid, start, goal, hooks),
        Solver::Dijkstra => solve_best_first(grid, start, goal, Movement::Four, Keying::Cost, hooks),
        Solver::GreedyBestFirst(movement) => {
            solve_best_first(grid, start, goal, movement, Keying::Greedy, hooks)
        }
        Solver::AStar(heuristic) => solve_best_first(
            grid,
            start,
            goal,
            heuristic.movement(),
            Keying::AStar(heuristic),
            hooks,
        ),
    };
    let result = finish(grid, start, goal, stats, hooks);
    tracing::info!(
        "[solve] {}: reachable={} length={} expanded={} insertions={}",
        solver,
        result.reachable,
        result.path_length,
        result.expanded_count,
        result.frontier_insertions
    );
    Ok(result)
}

/// Walks the `incoming` marks back from the goal, flags the path and builds
/// the result.
fn finish(grid: &mut Grid, start: Coord, goal: Coord, stats: SearchStats, hooks: &mut Hooks) -> SolveResult {
    let mut result = SolveResult {
        reachable: false,
        path_length: 0,
        path_cost: 0.0,
        expanded_count: stats.expanded,
        frontier_insertions: stats.insertions,
        cancelled: stats.cancelled,
        path: Vec::new(),
    };
    if !stats.found {
        return result;
    }

    let mut path = Vec::new();
    let mut current = goal;
    loop {
        let incoming = grid[current].search().incoming;
        path.push(PathStep {
            cell: current,
            incoming,
        });
        if current == start {
            break;
        }
        match incoming.and_then(|dir| current.step(dir.opposite())) {
            Some(prev) if path.len() <= grid.len() => current = prev,
            _ => {
                tracing::debug!("[solve] broken parent chain at {}", current);
                return result;
            }
        }
    }
    path.reverse();
    // The start is never entered from anywhere
    path[0].incoming = None;

    for step in &path {
        grid.search_mut(step.cell).on_path = true;
        hooks.emit(MazeEvent::PathStep(step.cell, step.incoming));
    }
    result.reachable = true;
    result.path_length = path.len() - 1;
    result.path_cost = grid[goal].search().g;
    result.path = path;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{Generator, generate_maze, get_rng};
    use crate::postprocess::{add_loops, add_rooms};

    fn fixture() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        for (a, b) in grid.edges().collect::<Vec<_>>() {
            grid.open(a, b);
        }
        grid.close(Coord::new(0, 0), Coord::new(0, 1));
        grid.close(Coord::new(1, 1), Coord::new(1, 2));
        grid
    }

    fn perfect(seed: u64, generator: Generator) -> Grid {
        let mut grid = Grid::new(18, 23).unwrap();
        let mut rng = get_rng(Some(seed));
        generate_maze(&mut grid, generator, &mut rng, &mut Hooks::none());
        grid.randomize_endpoints(&mut rng);
        grid
    }

    fn run(grid: &mut Grid, solver: Solver) -> SolveResult {
        solve_maze(grid, solver, &mut Hooks::none()).unwrap()
    }

    #[test]
    fn test_fixture_every_solver() {
        for solver in Solver::ALL {
            let mut grid = fixture();
            let result = run(&mut grid, solver);
            assert!(result.reachable, "{solver}");
            if solver != Solver::Dfs && !matches!(solver, Solver::GreedyBestFirst(_)) {
                let expected = match solver {
                    // Diagonal (1, 0) -> (2, 1) is legal in the open lower-left block
                    Solver::AStar(h) if h.movement() != Movement::Four => 3,
                    _ => 4,
                };
                assert_eq!(result.path_length, expected, "{solver}");
            }
            let first = result.path.first().unwrap();
            let last = result.path.last().unwrap();
            assert_eq!((first.cell, first.incoming), (Coord::new(0, 0), None));
            assert_eq!(last.cell, Coord::new(2, 2));
        }
    }

    #[test]
    fn test_path_is_walkable() {
        let mut grid = perfect(4, Generator::Prim);
        for solver in Solver::ALL {
            let result = run(&mut grid, solver);
            for pair in result.path.windows(2) {
                let dir = pair[1].incoming.unwrap();
                assert_eq!(pair[0].cell.step(dir), Some(pair[1].cell), "{solver}");
                let movement = match solver {
                    Solver::GreedyBestFirst(m) => m,
                    Solver::AStar(h) => h.movement(),
                    _ => Movement::Four,
                };
                assert!(
                    movement
                        .neighbors(&grid, pair[0].cell)
                        .contains(&(dir, pair[1].cell))
                );
            }
            assert!(result.path.iter().all(|s| grid[s.cell].search().on_path));
        }
    }

    #[test]
    fn test_admissible_match_bfs() {
        for seed in 0..6 {
            for generator in [Generator::Kruskal, Generator::HuntAndKill(Default::default())] {
                let mut grid = perfect(seed, generator);
                let bfs = run(&mut grid, Solver::Bfs);
                for solver in Solver::ALL {
                    if let Solver::AStar(h) = solver {
                        if !h.is_admissible() {
                            continue;
                        }
                    }
                    let result = run(&mut grid, solver);
                    match solver {
                        Solver::Dfs | Solver::GreedyBestFirst(_) => {
                            assert!(result.path_length >= bfs.path_length)
                        }
                        _ => assert_eq!(result.path_length, bfs.path_length, "{solver}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_admissible_optimal_with_loops() {
        for seed in 0..6 {
            let mut grid = perfect(seed, Generator::Prim);
            let mut rng = get_rng(Some(seed + 100));
            add_rooms(&mut grid, 40, &mut rng, &mut Hooks::none());
            add_loops(&mut grid, 60, &mut rng, &mut Hooks::none());
            let bfs = run(&mut grid, Solver::Bfs);
            let dijkstra = run(&mut grid, Solver::Dijkstra);
            let manhattan = run(
                &mut grid,
                Solver::AStar(Heuristic::plain(HeuristicKind::Manhattan)),
            );
            let secondary = run(
                &mut grid,
                Solver::AStar(Heuristic::new(
                    HeuristicKind::Manhattan,
                    TieBreak::SecondaryKey,
                )),
            );
            assert_eq!(dijkstra.path_length, bfs.path_length);
            assert_eq!(manhattan.path_length, bfs.path_length);
            assert_eq!(secondary.path_length, bfs.path_length);
            assert!(manhattan.expanded_count <= dijkstra.expanded_count);

            // Octile may cut corners through open rooms but never costs more
            let octile = run(&mut grid, Solver::AStar(Heuristic::plain(HeuristicKind::Octile)));
            assert!(octile.path_cost <= bfs.path_cost + 1e-9);
            assert!(octile.path_length <= bfs.path_length);
        }
    }

    #[test]
    fn test_dfs_never_shorter_than_bfs() {
        for seed in 0..8 {
            let mut grid = perfect(seed, Generator::Prim);
            let mut rng = get_rng(Some(seed));
            add_loops(&mut grid, 100, &mut rng, &mut Hooks::none());
            let bfs = run(&mut grid, Solver::Bfs);
            let dfs = run(&mut grid, Solver::Dfs);
            assert!(dfs.path_length >= bfs.path_length);
        }
    }

    #[test]
    fn test_obstacle_wall_blocks_every_solver() {
        let mut grid = Grid::new(3, 3).unwrap();
        for (a, b) in grid.edges().collect::<Vec<_>>() {
            grid.open(a, b);
        }
        for cell in [Coord::new(0, 2), Coord::new(1, 1), Coord::new(2, 0)] {
            grid.set_obstacle(cell);
        }
        for solver in Solver::ALL {
            let result = run(&mut grid, solver);
            assert!(!result.reachable, "{solver}");
            assert!(!result.cancelled);
            assert_eq!(result.path_length, 0);
            assert!(result.path.is_empty());
        }
    }

    #[test]
    fn test_resolve_after_obstacle_edit() {
        let mut grid = perfect(2, Generator::RecurBacktrack(Default::default()));
        let first = run(&mut grid, Solver::Bfs);
        assert!(first.reachable);
        // Block the middle of the only route
        let middle = first.path[first.path.len() / 2].cell;
        grid.set_obstacle(middle);
        for solver in Solver::ALL {
            let result = run(&mut grid, solver);
            assert!(!result.reachable, "{solver}");
            assert!(grid.coords().all(|c| !grid[c].search().on_path));
        }
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        let mut grid = Grid::new(1, 1).unwrap();
        assert_eq!(
            solve_maze(&mut grid, Solver::Bfs, &mut Hooks::none()),
            Err(MazeError::StartIsGoal(Coord::new(0, 0)))
        );
    }

    #[test]
    fn test_cancelled_solve() {
        let mut grid = perfect(1, Generator::Kruskal);
        for solver in Solver::ALL {
            let token = crate::events::CancelToken::new();
            token.cancel();
            let mut hooks = Hooks::none().with_cancel(token);
            let result = solve_maze(&mut grid, solver, &mut hooks).unwrap();
            assert!(result.cancelled, "{solver}");
            assert!(!result.reachable);
        }
    }
}
