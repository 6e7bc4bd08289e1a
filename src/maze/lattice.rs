//! Wall segments seen from the corner lattice.
//!
//! A `height x width` maze has `(height + 1) x (width + 1)` corner points. Each
//! wall segment joins two neighboring points. The border segments always exist.
//! The post-processors use this view to reason about 2x2 blocks (an interior
//! point with no walls at all) and walls that would lose their link to the border.

use std::collections::HashSet;

use super::{Coord, Grid};

/// A corner point `(i, j)` with `i` in `0..=height` and `j` in `0..=width`.
pub(crate) type Point = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    /// From `(i, j)` to `(i, j + 1)`, above cell `(i, j)`.
    Horizontal(usize, usize),
    /// From `(i, j)` to `(i + 1, j)`, left of cell `(i, j)`.
    Vertical(usize, usize),
}

impl Segment {
    pub(crate) fn endpoints(self) -> [Point; 2] {
        match self {
            Segment::Horizontal(i, j) => [(i, j), (i, j + 1)],
            Segment::Vertical(i, j) => [(i, j), (i + 1, j)],
        }
    }
}

/// The segment between two orthogonally adjacent cells.
///
/// # Panics
/// If the cells are not adjacent.
pub(crate) fn between(a: Coord, b: Coord) -> Segment {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo.col == hi.col && lo.row + 1 == hi.row {
        Segment::Horizontal(hi.row, hi.col)
    } else if lo.row == hi.row && lo.col + 1 == hi.col {
        Segment::Vertical(hi.row, hi.col)
    } else {
        panic!("Cells {a} and {b} are not adjacent");
    }
}

pub(crate) fn is_border_point(grid: &Grid, (i, j): Point) -> bool {
    i == 0 || j == 0 || i == grid.height() || j == grid.width()
}

pub(crate) fn is_wall(grid: &Grid, segment: Segment) -> bool {
    match segment {
        Segment::Horizontal(i, j) => {
            i == 0 || i == grid.height() || !grid[Coord::new(i, j)].top_open()
        }
        Segment::Vertical(i, j) => {
            j == 0 || j == grid.width() || !grid[Coord::new(i, j - 1)].right_open()
        }
    }
}

/// Segments touching `p`, whether or not they are walls.
pub(crate) fn segments_at(grid: &Grid, (i, j): Point) -> impl Iterator<Item = Segment> + use<> {
    let (height, width) = (grid.height(), grid.width());
    [
        (j > 0).then(|| Segment::Horizontal(i, j - 1)),
        (j < width).then(|| Segment::Horizontal(i, j)),
        (i > 0).then(|| Segment::Vertical(i - 1, j)),
        (i < height).then(|| Segment::Vertical(i, j)),
    ]
    .into_iter()
    .flatten()
}

/// Number of walls meeting at `p`.
pub(crate) fn walls_at(grid: &Grid, p: Point) -> usize {
    segments_at(grid, p).filter(|&s| is_wall(grid, s)).count()
}

/// Would opening the closed edge `a-b` leave some interior corner with no
/// walls, i.e. a fully open 2x2 block?
pub(crate) fn completes_open_block(grid: &Grid, a: Coord, b: Coord) -> bool {
    let removed = between(a, b);
    removed
        .endpoints()
        .into_iter()
        .any(|p| !is_border_point(grid, p) && walls_at(grid, p) == 1)
}

/// Would opening the closed edge `a-b` cut some wall piece off from the
/// border? Only walls touching the removed segment can be affected, so each
/// of its two endpoints must still reach the border through walls, unless no
/// wall is left there at all.
pub(crate) fn detaches_walls(grid: &Grid, a: Coord, b: Coord) -> bool {
    let removed = between(a, b);
    removed
        .endpoints()
        .into_iter()
        .any(|end| !reaches_border(grid, end, removed))
}

/// Walks the walls from `from`, ignoring `skip`, until a border point is hit.
fn reaches_border(grid: &Grid, from: Point, skip: Segment) -> bool {
    if is_border_point(grid, from) {
        return true;
    }
    let walls = |p: Point| {
        segments_at(grid, p).filter(move |&s| s != skip && is_wall(grid, s))
    };
    if walls(from).next().is_none() {
        return true;
    }
    let mut seen = HashSet::from([from]);
    let mut stack = vec![from];
    while let Some(point) = stack.pop() {
        for segment in walls(point) {
            let [x, y] = segment.endpoints();
            let next = if x == point { y } else { x };
            if is_border_point(grid, next) {
                return true;
            }
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    false
}
