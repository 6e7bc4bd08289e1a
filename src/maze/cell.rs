use crate::maze::Direction;

/// One cell of the maze.
///
/// Only the top and right edges are stored here. The bottom edge of a cell is
/// the top edge of the cell below it, and the left edge is the right edge of
/// the cell to its left, so every edge has exactly one owner.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Edge to `row - 1` is open.
    pub(crate) top_open: bool,
    /// Edge to `col + 1` is open.
    pub(crate) right_open: bool,
    /// Impassable terrain placed by the obstacle pass or by the host.
    pub(crate) obstacle: bool,
    /// Part of a component that does not touch the shortest start-goal path.
    pub(crate) island: bool,
    pub(crate) search: SearchMarks,
}

impl Cell {
    pub fn top_open(&self) -> bool {
        self.top_open
    }

    pub fn right_open(&self) -> bool {
        self.right_open
    }

    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    pub fn is_island(&self) -> bool {
        self.island
    }

    /// Solver bookkeeping from the most recent solve call.
    pub fn search(&self) -> &SearchMarks {
        &self.search
    }
}

/// Per-cell solver state, reset at the start of every solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchMarks {
    /// Pushed onto the frontier at least once.
    pub opened: bool,
    /// Expanded; never expanded again during this solve.
    pub closed: bool,
    /// Cost of the best known path from the start.
    pub g: f64,
    /// Heuristic estimate to the goal (0 for uninformed solvers).
    pub h: f64,
    /// Frontier priority the cell was last pushed with.
    pub f: f64,
    /// Direction of travel used to reach this cell on the best known path.
    pub incoming: Option<Direction>,
    pub on_path: bool,
    pub dead_end: bool,
}

impl Default for SearchMarks {
    fn default() -> Self {
        Self {
            opened: false,
            closed: false,
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            incoming: None,
            on_path: false,
            dead_end: false,
        }
    }
}
