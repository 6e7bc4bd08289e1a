use std::f64::consts::SQRT_2;

use super::{Movement, frontier::PriorityKey};
use crate::maze::Coord;

/// Weight of the cross-product tie-break term.
pub const CROSS_PRODUCT_SCALE: f64 = 0.001;

fn deltas(a: Coord, b: Coord) -> (f64, f64) {
    (
        a.row.abs_diff(b.row) as f64,
        a.col.abs_diff(b.col) as f64,
    )
}

pub fn manhattan(a: Coord, b: Coord) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr + dc
}

pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr.hypot(dc)
}

pub fn chebyshev(a: Coord, b: Coord) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr.max(dc)
}

pub fn octile(a: Coord, b: Coord) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr.max(dc) + (SQRT_2 - 1.0) * dr.min(dc)
}

/// `|(goal - start) x (cell - start)|`: zero on the straight line from start
/// to goal, growing with the distance from it.
pub fn cross_product(cell: Coord, start: Coord, goal: Coord) -> f64 {
    let signed = |to: Coord| {
        (
            to.row as f64 - start.row as f64,
            to.col as f64 - start.col as f64,
        )
    };
    let (goal_dr, goal_dc) = signed(goal);
    let (cell_dr, cell_dc) = signed(cell);
    (goal_dc * cell_dr - goal_dr * cell_dc).abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    /// 4-directional, admissible.
    Manhattan,
    /// Manhattan plus Euclidean. Overestimates, so paths may be longer than
    /// optimal, but far fewer cells are expanded.
    ManhattanEuclidean,
    /// 8-directional with diagonal steps costing 1, admissible.
    Chebyshev,
    /// 8-directional with diagonal steps costing sqrt 2, admissible.
    Octile,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    #[default]
    None,
    /// Adds [`CROSS_PRODUCT_SCALE`] times [`cross_product`] to `h`, favoring
    /// cells near the start-goal line. Breaks admissibility.
    CrossProduct,
    /// Leaves `f` alone and orders equal `f` by Manhattan, then Euclidean
    /// distance to the goal.
    SecondaryKey,
}

/// A* heuristic configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heuristic {
    pub kind: HeuristicKind,
    pub tie_break: TieBreak,
}

impl Heuristic {
    pub const fn new(kind: HeuristicKind, tie_break: TieBreak) -> Self {
        Heuristic { kind, tie_break }
    }

    pub const fn plain(kind: HeuristicKind) -> Self {
        Heuristic::new(kind, TieBreak::None)
    }

    /// Movement model the heuristic is meant for.
    pub const fn movement(&self) -> Movement {
        match self.kind {
            HeuristicKind::Manhattan | HeuristicKind::ManhattanEuclidean => Movement::Four,
            HeuristicKind::Chebyshev => Movement::EightUniform,
            HeuristicKind::Octile => Movement::EightOctile,
        }
    }

    /// Whether A* with this heuristic always returns a cheapest path.
    pub const fn is_admissible(&self) -> bool {
        !matches!(self.kind, HeuristicKind::ManhattanEuclidean)
            && !matches!(self.tie_break, TieBreak::CrossProduct)
    }

    /// `h` for `cell`, including the cross-product term when enabled.
    pub fn estimate(&self, cell: Coord, start: Coord, goal: Coord) -> f64 {
        let raw = match self.kind {
            HeuristicKind::Manhattan => manhattan(cell, goal),
            HeuristicKind::ManhattanEuclidean => manhattan(cell, goal) + euclidean(cell, goal),
            HeuristicKind::Chebyshev => chebyshev(cell, goal),
            HeuristicKind::Octile => octile(cell, goal),
        };
        match self.tie_break {
            TieBreak::CrossProduct => {
                raw + CROSS_PRODUCT_SCALE * cross_product(cell, start, goal)
            }
            TieBreak::None | TieBreak::SecondaryKey => raw,
        }
    }

    /// Frontier key for a cell reached at cost `g` with estimate `h`.
    pub fn key(&self, g: f64, h: f64, cell: Coord, goal: Coord) -> PriorityKey {
        match self.tie_break {
            TieBreak::SecondaryKey => {
                PriorityKey::with_ties(g + h, manhattan(cell, goal), euclidean(cell, goal))
            }
            TieBreak::None | TieBreak::CrossProduct => PriorityKey::new(g + h),
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            HeuristicKind::Manhattan => "Manhattan",
            HeuristicKind::ManhattanEuclidean => "Manhattan+Euclidean",
            HeuristicKind::Chebyshev => "Chebyshev",
            HeuristicKind::Octile => "Octile",
        };
        match self.tie_break {
            TieBreak::None => write!(f, "{kind}"),
            TieBreak::CrossProduct => write!(f, "{kind}, cross-product tie-break"),
            TieBreak::SecondaryKey => write!(f, "{kind}, secondary key"),
        }
    }
}
