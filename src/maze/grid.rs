use std::fmt;

use rand::Rng;

use super::{Cell, Coord, Direction, SearchMarks, lattice};
use crate::error::MazeError;

/// A `height x width` maze with a start and a goal cell.
///
/// Walls live on the edges between cells (see [`Cell`]). A freshly created grid
/// has every edge closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Box<[Cell]>,
    height: usize,
    width: usize,
    start: Coord,
    goal: Coord,
}

impl Grid {
    /// Allocates an all-walls grid. Start is the top-left corner and goal the
    /// bottom-right one until [`Grid::randomize_endpoints`] or
    /// [`Grid::set_endpoints`] say otherwise.
    pub fn new(height: usize, width: usize) -> Result<Self, MazeError> {
        if height == 0 || width == 0 {
            return Err(MazeError::InvalidDimensions { height, width });
        }
        let cells = vec![Cell::default(); height * width].into_boxed_slice();
        Ok(Grid {
            cells,
            height,
            width,
            start: Coord::new(0, 0),
            goal: Coord::new(height - 1, width - 1),
        })
    }

    /// Reallocates the grid with new dimensions and clears every field.
    pub fn reset(&mut self, height: usize, width: usize) -> Result<(), MazeError> {
        *self = Grid::new(height, width)?;
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    pub fn check_bounds(&self, coord: Coord) -> Result<(), MazeError> {
        if self.in_bounds(coord) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                coord,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub(crate) fn ravel_index(&self, coord: Coord) -> usize {
        coord.row * self.width + coord.col
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let idx = self.ravel_index(coord);
        &mut self.cells[idx]
    }

    pub(crate) fn search_mut(&mut self, coord: Coord) -> &mut SearchMarks {
        &mut self.cell_mut(coord).search
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Coord::new(row, col)))
    }

    /// Neighbor of `coord` in `dir`, if it is on the grid.
    pub fn adjacent(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        coord.step(dir).filter(|&c| self.in_bounds(c))
    }

    /// Cardinal direction from `a` to `b`, if they share an edge.
    pub fn direction_between(&self, a: Coord, b: Coord) -> Option<Direction> {
        Direction::CARDINALS
            .into_iter()
            .find(|&dir| a.step(dir) == Some(b))
    }

    /// Locates the cell and flag that own the edge between `a` and `b`.
    /// Returns `(owner, is_top)`: the top edge of `owner` when `is_top`,
    /// its right edge otherwise.
    ///
    /// # Panics
    /// If either cell is out of bounds or the cells are not orthogonally adjacent.
    fn edge_owner(&self, a: Coord, b: Coord) -> (Coord, bool) {
        if !self.in_bounds(a) || !self.in_bounds(b) {
            panic!("Edge {a}-{b} is out of bounds");
        }
        match self.direction_between(a, b) {
            Some(Direction::Up) => (a, true),
            Some(Direction::Down) => (b, true),
            Some(Direction::Right) => (a, false),
            Some(Direction::Left) => (b, false),
            _ => panic!("Cells {a} and {b} are not adjacent"),
        }
    }

    /// Whether the edge between two adjacent cells is open.
    ///
    /// # Panics
    /// If the cells are out of bounds or not adjacent.
    pub fn is_open(&self, a: Coord, b: Coord) -> bool {
        let (owner, is_top) = self.edge_owner(a, b);
        let cell = &self[owner];
        if is_top { cell.top_open } else { cell.right_open }
    }

    /// Whether a cardinal step from `coord` crosses an open edge. Steps off
    /// the grid are never open.
    pub fn is_open_towards(&self, coord: Coord, dir: Direction) -> bool {
        match self.adjacent(coord, dir) {
            Some(next) if !dir.is_diagonal() => self.is_open(coord, next),
            _ => false,
        }
    }

    fn set_edge(&mut self, a: Coord, b: Coord, open: bool) -> bool {
        let (owner, is_top) = self.edge_owner(a, b);
        let cell = self.cell_mut(owner);
        let flag = if is_top {
            &mut cell.top_open
        } else {
            &mut cell.right_open
        };
        let changed = *flag != open;
        *flag = open;
        changed
    }

    /// Removes the wall between two adjacent cells.
    /// Returns `true` if a wall was removed, `false` if the edge was already open.
    ///
    /// # Panics
    /// If the cells are out of bounds or not adjacent.
    pub fn open(&mut self, a: Coord, b: Coord) -> bool {
        self.set_edge(a, b, true)
    }

    /// Puts a wall between two adjacent cells.
    /// Returns `true` if a wall was added.
    ///
    /// # Panics
    /// If the cells are out of bounds or not adjacent.
    pub fn close(&mut self, a: Coord, b: Coord) -> bool {
        self.set_edge(a, b, false)
    }

    /// Closes every edge and clears obstacle, island and search state.
    /// Endpoints are kept.
    pub fn close_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::default());
    }

    /// Every adjacent pair, as `(cell, right or lower neighbor)`, in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (Coord, Coord)> + use<> {
        let (height, width) = (self.height, self.width);
        self.coords().flat_map(move |c| {
            [
                (c.col + 1 < width).then(|| (c, Coord::new(c.row, c.col + 1))),
                (c.row + 1 < height).then(|| (c, Coord::new(c.row + 1, c.col))),
            ]
            .into_iter()
            .flatten()
        })
    }

    /// Open edges in the same order as [`Grid::edges`].
    pub fn open_edges(&self) -> Vec<(Coord, Coord)> {
        self.edges().filter(|&(a, b)| self.is_open(a, b)).collect()
    }

    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| cell.top_open as usize + cell.right_open as usize)
            .sum()
    }

    /// Open cardinal neighbors of `coord`, excluding obstacle cells.
    pub fn neighbors4(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::CARDINALS.into_iter().filter_map(move |dir| {
            let next = self.adjacent(coord, dir)?;
            (self.is_open(coord, next) && !self[next].obstacle).then_some((dir, next))
        })
    }

    /// Open cardinal neighbors followed by legal diagonal ones.
    ///
    /// A diagonal step from `a` to `d` across the 2x2 block `{a, b, c, d}` is
    /// legal only when both `a-b-d` and `a-c-d` are open, so the move never
    /// touches a wall at the shared corner.
    pub fn neighbors8(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        let diagonals = Direction::DIAGONALS.into_iter().filter_map(move |dir| {
            let next = self.adjacent(coord, dir)?;
            (self.is_diagonal_open(coord, dir) && !self[next].obstacle).then_some((dir, next))
        });
        self.neighbors4(coord).chain(diagonals)
    }

    /// Whether the diagonal move from `coord` in `dir` is legal.
    pub fn is_diagonal_open(&self, coord: Coord, dir: Direction) -> bool {
        let Some((vertical, horizontal)) = dir.split() else {
            return false;
        };
        let (Some(b), Some(c)) = (
            self.adjacent(coord, vertical),
            self.adjacent(coord, horizontal),
        ) else {
            return false;
        };
        [b, c].iter().all(|&side| !self[side].obstacle)
            && self.is_open(coord, b)
            && self.is_open(coord, c)
            && self.is_open_towards(b, horizontal)
            && self.is_open_towards(c, vertical)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        Coord::new(
            rng.random_range(0..self.height),
            rng.random_range(0..self.width),
        )
    }

    /// Sets start and goal after checking both are on the grid and distinct.
    pub fn set_endpoints(&mut self, start: Coord, goal: Coord) -> Result<(), MazeError> {
        self.check_bounds(start)?;
        self.check_bounds(goal)?;
        if start == goal {
            return Err(MazeError::StartIsGoal(start));
        }
        self.start = start;
        self.goal = goal;
        Ok(())
    }

    /// Puts the start on a random corner and the goal on the opposite corner.
    pub fn randomize_endpoints<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (last_row, last_col) = (self.height - 1, self.width - 1);
        let corners = [
            Coord::new(0, 0),
            Coord::new(0, last_col),
            Coord::new(last_row, last_col),
            Coord::new(last_row, 0),
        ];
        let corner = rng.random_range(0..corners.len());
        self.start = corners[corner];
        self.goal = corners[(corner + 2) % corners.len()];
    }

    /// Turns a cell into an obstacle and closes its four edges.
    /// Returns the neighbors whose edge to `coord` was open.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn set_obstacle(&mut self, coord: Coord) -> Vec<Coord> {
        if !self.in_bounds(coord) {
            panic!("Obstacle {coord} is out of bounds");
        }
        self.cell_mut(coord).obstacle = true;
        let neighbors: Vec<Coord> = Direction::CARDINALS
            .into_iter()
            .filter_map(|dir| self.adjacent(coord, dir))
            .collect();
        neighbors
            .into_iter()
            .filter(|&next| self.close(coord, next))
            .collect()
    }

    pub(crate) fn set_island(&mut self, coord: Coord, island: bool) {
        self.cell_mut(coord).island = island;
    }

    /// Clears solver state on every cell.
    pub fn reset_search(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|cell| cell.search = SearchMarks::default());
    }

    /// Lays the maze out on a `(2h + 1) x (2w + 1)` glyph grid: cells at odd
    /// positions, edges between them, wall posts at even/even positions.
    pub fn glyphs(&self) -> Vec<Vec<Glyph>> {
        let rows = self.height * 2 + 1;
        let cols = self.width * 2 + 1;
        let mut out = vec![vec![Glyph::Wall; cols]; rows];
        for (y, line) in out.iter_mut().enumerate() {
            for (x, glyph) in line.iter_mut().enumerate() {
                *glyph = match (y % 2, x % 2) {
                    (1, 1) => self.cell_glyph(Coord::new(y / 2, x / 2)),
                    (0, 0) => {
                        if lattice::walls_at(self, (y / 2, x / 2)) > 0 {
                            Glyph::Wall
                        } else {
                            Glyph::Open
                        }
                    }
                    (0, _) => {
                        // Horizontal wall above cell (y / 2, x / 2)
                        let below = Coord::new(y / 2, x / 2);
                        if y == 0 || y == rows - 1 {
                            Glyph::Wall
                        } else {
                            let above = Coord::new(below.row - 1, below.col);
                            self.edge_glyph(above, below)
                        }
                    }
                    _ => {
                        // Vertical wall left of cell (y / 2, x / 2)
                        let right = Coord::new(y / 2, x / 2);
                        if x == 0 || x == cols - 1 {
                            Glyph::Wall
                        } else {
                            let left = Coord::new(right.row, right.col - 1);
                            self.edge_glyph(left, right)
                        }
                    }
                };
            }
        }
        out
    }

    fn cell_glyph(&self, coord: Coord) -> Glyph {
        let cell = &self[coord];
        if coord == self.start {
            Glyph::Start
        } else if coord == self.goal {
            Glyph::Goal
        } else if cell.obstacle {
            Glyph::Obstacle
        } else if cell.search.on_path {
            Glyph::Route
        } else if cell.search.dead_end {
            Glyph::DeadEnd
        } else if cell.search.closed || cell.search.opened {
            Glyph::Visited
        } else if cell.island {
            Glyph::Island
        } else {
            Glyph::Open
        }
    }

    fn edge_glyph(&self, a: Coord, b: Coord) -> Glyph {
        if !self.is_open(a, b) {
            Glyph::Wall
        } else if self[a].search.on_path && self[b].search.on_path {
            Glyph::Route
        } else if self[a].island && self[b].island {
            Glyph::Island
        } else {
            Glyph::Open
        }
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}

/// What a host should draw at one position of [`Grid::glyphs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Open,
    Start,
    Goal,
    Obstacle,
    Island,
    Visited,
    DeadEnd,
    Route,
}

impl Glyph {
    pub const fn symbol(self) -> char {
        match self {
            Glyph::Wall => '#',
            Glyph::Open => ' ',
            Glyph::Start => 'S',
            Glyph::Goal => 'G',
            Glyph::Obstacle => '%',
            Glyph::Island => '~',
            Glyph::Visited => '.',
            Glyph::DeadEnd => 'x',
            Glyph::Route => '*',
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.glyphs() {
            let text: String = line.into_iter().map(Glyph::symbol).collect();
            writeln!(f, "{text}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn open_all(grid: &mut Grid) {
        for (a, b) in grid.edges().collect::<Vec<_>>() {
            grid.open(a, b);
        }
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 3),
            Err(MazeError::InvalidDimensions {
                height: 0,
                width: 3
            })
        );
    }

    #[test]
    fn test_edge_is_shared() {
        let mut grid = Grid::new(3, 3).unwrap();
        let a = Coord::new(1, 1);
        for dir in Direction::CARDINALS {
            let b = grid.adjacent(a, dir).unwrap();
            assert!(grid.open(a, b));
            assert!(grid.is_open(a, b));
            assert!(grid.is_open(b, a));
            // Opening again is a no-op
            assert!(!grid.open(b, a));
            assert!(grid.close(b, a));
            assert!(!grid.is_open(a, b));
        }
        assert_eq!(grid.open_edge_count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_open_non_adjacent_panics() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open(Coord::new(0, 0), Coord::new(1, 1));
    }

    #[test]
    fn test_edge_count() {
        let mut grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.edges().count(), 3 * 3 + 2 * 4);
        open_all(&mut grid);
        assert_eq!(grid.open_edge_count(), 17);
        assert_eq!(grid.open_edges().len(), 17);
    }

    #[test]
    fn test_neighbors4_filters_walls() {
        let mut grid = Grid::new(3, 3).unwrap();
        let center = Coord::new(1, 1);
        grid.open(center, Coord::new(0, 1));
        grid.open(center, Coord::new(1, 0));
        let neighbors: Vec<_> = grid.neighbors4(center).collect();
        assert_eq!(
            neighbors,
            vec![
                (Direction::Up, Coord::new(0, 1)),
                (Direction::Left, Coord::new(1, 0))
            ]
        );
    }

    #[test]
    fn test_diagonal_requires_both_routes() {
        let mut grid = Grid::new(2, 2).unwrap();
        let (a, b, c, d) = (
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 0),
            Coord::new(1, 1),
        );
        // One L-shaped route only
        grid.open(a, b);
        grid.open(b, d);
        assert!(!grid.is_diagonal_open(a, Direction::DownRight));
        assert_eq!(grid.neighbors8(a).count(), 1);

        grid.open(a, c);
        grid.open(c, d);
        assert!(grid.is_diagonal_open(a, Direction::DownRight));
        assert!(grid.is_diagonal_open(d, Direction::UpLeft));
        assert!(
            grid.neighbors8(a)
                .any(|(dir, n)| dir == Direction::DownRight && n == d)
        );

        grid.set_obstacle(b);
        assert!(!grid.is_diagonal_open(a, Direction::DownRight));
    }

    #[test]
    fn test_obstacle_closes_edges() {
        let mut grid = Grid::new(3, 3).unwrap();
        open_all(&mut grid);
        let closed = grid.set_obstacle(Coord::new(1, 1));
        assert_eq!(closed.len(), 4);
        assert!(grid[Coord::new(1, 1)].is_obstacle());
        assert_eq!(grid.open_edge_count(), 12 - 4);
        assert_eq!(grid.neighbors4(Coord::new(0, 1)).count(), 2);
    }

    #[test]
    fn test_endpoints() {
        let mut grid = Grid::new(4, 5).unwrap();
        assert_eq!(
            grid.set_endpoints(Coord::new(1, 1), Coord::new(1, 1)),
            Err(MazeError::StartIsGoal(Coord::new(1, 1)))
        );
        assert!(
            grid.set_endpoints(Coord::new(0, 0), Coord::new(4, 0))
                .is_err()
        );

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            grid.randomize_endpoints(&mut rng);
            let (s, g) = (grid.start(), grid.goal());
            assert_eq!(s.row.abs_diff(g.row), 3);
            assert_eq!(s.col.abs_diff(g.col), 4);
        }
    }

    #[test]
    fn test_display_layout() {
        let mut grid = Grid::new(1, 2).unwrap();
        grid.open(Coord::new(0, 0), Coord::new(0, 1));
        assert_eq!(grid.to_string(), "#####\n#S G#\n#####\n");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut grid = Grid::new(2, 2).unwrap();
        open_all(&mut grid);
        grid.set_obstacle(Coord::new(0, 1));
        grid.reset(3, 2).unwrap();
        assert_eq!((grid.height(), grid.width()), (3, 2));
        assert_eq!(grid.open_edge_count(), 0);
        assert!(grid.coords().all(|c| !grid[c].is_obstacle()));
    }
}
