//! Rectangular grid mazes: carving, post-processing and path search.
//!
//! [`generate`] builds a maze from [`MazeParams`] and [`solve`] runs one of the
//! [`Solver`]s over it. Both accept [`Hooks`] to observe progress or stop early.

pub mod config;
pub mod error;
pub mod events;
pub mod generators;
pub mod maze;
pub mod postprocess;
pub mod solvers;

pub use config::MazeParams;
pub use error::MazeError;
pub use events::{CancelToken, ChannelObserver, Hooks, MazeEvent, Observer};
pub use generators::{CarveStyle, Generator};
pub use maze::{Coord, Direction, Grid};
pub use postprocess::PostProcessReport;
pub use solvers::{Heuristic, HeuristicKind, Movement, PathStep, SolveResult, Solver, TieBreak};

/// Carves a perfect maze with `params.generator`, picks a corner start with
/// the goal in the opposite corner, then applies the post-processing passes.
///
/// The same parameters with the same seed always produce the same grid. A run
/// stopped through `hooks` returns the grid as far as it got.
pub fn generate(params: &MazeParams, hooks: &mut Hooks) -> Result<Grid, MazeError> {
    params.validate()?;
    let mut grid = Grid::new(params.height, params.width)?;
    let mut rng = generators::get_rng(params.seed);

    generators::generate_maze(&mut grid, params.generator, &mut rng, hooks);
    grid.randomize_endpoints(&mut rng);
    let report = if hooks.should_stop() {
        PostProcessReport::default()
    } else {
        postprocess::apply_all(&mut grid, params, &mut rng, hooks)
    };

    tracing::info!(
        "[generate] {}x{} {} start={} goal={} open_edges={} {:?}",
        grid.height(),
        grid.width(),
        params.generator,
        grid.start(),
        grid.goal(),
        grid.open_edge_count(),
        report
    );
    Ok(grid)
}

/// Searches from `grid.start()` to `grid.goal()`, leaving the search marks on
/// the grid for rendering.
pub fn solve(grid: &mut Grid, solver: Solver, hooks: &mut Hooks) -> Result<SolveResult, MazeError> {
    solvers::solve_maze(grid, solver, hooks)
}
