use super::{
    Movement, SearchStats,
    frontier::{Frontier, PriorityKey},
    heuristic::{Heuristic, euclidean},
};
use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Direction, Grid},
};

/// How the frontier is ordered.
#[derive(Debug, Clone, Copy)]
pub(super) enum Keying {
    /// Dijkstra: by cost so far.
    Cost,
    /// Greedy best-first: by straight-line distance to the goal only.
    Greedy,
    /// A*: by `g + h`.
    AStar(Heuristic),
}

impl Keying {
    /// `(h, key)` for `cell` reached at cost `g`.
    fn score(&self, g: f64, cell: Coord, start: Coord, goal: Coord) -> (f64, PriorityKey) {
        match self {
            Keying::Cost => (0.0, PriorityKey::new(g)),
            Keying::Greedy => {
                let h = euclidean(cell, goal);
                (h, PriorityKey::new(h))
            }
            Keying::AStar(heuristic) => {
                let h = heuristic.estimate(cell, start, goal);
                (h, heuristic.key(g, h, cell, goal))
            }
        }
    }
}

/// Shared loop of Dijkstra, greedy best-first and A*.
///
/// A neighbor is pushed whenever its cost improves, even if it is already on
/// the frontier; closed cells are skipped when popped. The search ends when
/// the goal is expanded or the frontier runs dry.
pub(super) fn solve_best_first(
    grid: &mut Grid,
    start: Coord,
    goal: Coord,
    movement: Movement,
    keying: Keying,
    hooks: &mut Hooks,
) -> SearchStats {
    let mut stats = SearchStats::default();
    let mut frontier = Frontier::new();

    let (h, key) = keying.score(0.0, start, start, goal);
    set_open(grid, start, 0.0, h, key, None);
    frontier.push(start, key);
    hooks.emit(MazeEvent::CellOpened(start));

    loop {
        if hooks.should_stop() {
            stats.cancelled = true;
            break;
        }
        let Some((cell, _)) = frontier.pop_open(|c| grid[c].search().closed) else {
            break;
        };
        grid.search_mut(cell).closed = true;
        stats.expanded += 1;
        hooks.emit(MazeEvent::CellExpanded(cell));
        if cell == goal {
            stats.found = true;
            break;
        }

        let g = grid[cell].search().g;
        for (dir, next) in movement.neighbors(grid, cell) {
            let marks = grid[next].search();
            let tentative = g + movement.step_cost(dir);
            if marks.closed || tentative >= marks.g {
                continue;
            }
            let (h, key) = keying.score(tentative, next, start, goal);
            set_open(grid, next, tentative, h, key, Some(dir));
            frontier.push(next, key);
            hooks.emit(MazeEvent::CellOpened(next));
        }
        hooks.emit(MazeEvent::CellClosed(cell));
    }

    stats.insertions = frontier.insertions();
    stats
}

fn set_open(
    grid: &mut Grid,
    cell: Coord,
    g: f64,
    h: f64,
    key: PriorityKey,
    incoming: Option<Direction>,
) {
    let marks = grid.search_mut(cell);
    marks.opened = true;
    marks.g = g;
    marks.h = h;
    marks.f = key.primary;
    marks.incoming = incoming;
}
