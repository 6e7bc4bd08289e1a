use rand::{Rng, SeedableRng, rngs::StdRng};

mod hunt_kill;
mod kruskal;
mod prim;
mod recur_backtrack;

use hunt_kill::hunt_and_kill;
use kruskal::randomized_kruskal;
use prim::randomized_prim;
use recur_backtrack::recursive_backtrack;

use crate::{
    events::{Hooks, MazeEvent},
    maze::{Coord, Direction, Grid},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// How a random walk picks its next direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CarveStyle {
    /// Any unvisited direction, uniformly.
    #[default]
    Straight,
    /// Turn whenever possible: directions on the axis we arrived along are
    /// skipped unless nothing else is left.
    Jagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    RecurBacktrack(CarveStyle),
    HuntAndKill(CarveStyle),
    Prim,
    Kruskal,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Generator::RecurBacktrack(CarveStyle::Straight),
        Generator::RecurBacktrack(CarveStyle::Jagged),
        Generator::HuntAndKill(CarveStyle::Straight),
        Generator::HuntAndKill(CarveStyle::Jagged),
        Generator::Prim,
        Generator::Kruskal,
    ];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let style = |style: &CarveStyle| match style {
            CarveStyle::Straight => "",
            CarveStyle::Jagged => " (jagged)",
        };
        match self {
            Generator::RecurBacktrack(s) => write!(f, "Recursive Backtracker{}", style(s)),
            Generator::HuntAndKill(s) => write!(f, "Hunt-and-Kill{}", style(s)),
            Generator::Prim => write!(f, "Prim's Algorithm"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Closes every wall of `grid` and carves a perfect maze into it.
///
/// Stops early, leaving a consistent but partial maze, when `hooks` asks to.
pub fn generate_maze(grid: &mut Grid, generator: Generator, rng: &mut StdRng, hooks: &mut Hooks) {
    grid.close_all();
    match generator {
        Generator::RecurBacktrack(style) => recursive_backtrack(grid, style, rng, hooks),
        Generator::HuntAndKill(style) => hunt_and_kill(grid, style, rng, hooks),
        Generator::Prim => randomized_prim(grid, rng, hooks),
        Generator::Kruskal => randomized_kruskal(grid, rng, hooks),
    }
    tracing::debug!(
        "[generate] {} carved {} of {} edges",
        generator,
        grid.open_edge_count(),
        grid.len() - 1
    );
}

/// Opens the edge `from -> to` and reports it.
fn carve(grid: &mut Grid, from: Coord, to: Coord, hooks: &mut Hooks) {
    grid.open(from, to);
    hooks.emit(MazeEvent::EdgeOpened(from, to));
    hooks.emit(MazeEvent::CellCarved(to));
}

/// Cardinal directions from `cell` leading to an on-grid cell not yet visited.
fn unvisited_directions(grid: &Grid, visited: &[bool], cell: Coord) -> Vec<Direction> {
    Direction::CARDINALS
        .into_iter()
        .filter(|&dir| {
            grid.adjacent(cell, dir)
                .is_some_and(|next| !visited[grid.ravel_index(next)])
        })
        .collect()
}

/// Picks the next direction of a random walk. `arrival` is the direction of
/// the step that brought the walk to the current cell.
fn choose_direction<R: Rng + ?Sized>(
    choices: &[Direction],
    arrival: Option<Direction>,
    style: CarveStyle,
    rng: &mut R,
) -> Option<Direction> {
    if choices.is_empty() {
        return None;
    }
    let axis = arrival.and_then(Direction::orientation);
    let turns: Vec<Direction> = match (style, axis) {
        (CarveStyle::Jagged, Some(axis)) => choices
            .iter()
            .copied()
            .filter(|dir| dir.orientation() != Some(axis))
            .collect(),
        _ => Vec::new(),
    };
    let pool = if turns.is_empty() { choices } else { &turns };
    Some(pool[rng.random_range(0..pool.len())])
}
