use crate::{
    events::Hooks,
    maze::{Coord, Grid},
};
use rand::{rngs::StdRng, seq::SliceRandom};

use super::carve;

/// Region bookkeeping: every cell starts in its own region and the regions
/// always partition the cells into connected components.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Region id of `x`.
    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

pub fn randomized_kruskal(grid: &mut Grid, rng: &mut StdRng, hooks: &mut Hooks) {
    let mut regions = UnionFind::new(grid.len());
    let merges_needed = grid.len() - 1;
    let mut merges = 0;

    // Shuffle edges randomly
    let mut edges: Vec<(Coord, Coord)> = grid.edges().collect();
    edges.shuffle(rng);

    for (a, b) in edges {
        if merges == merges_needed || hooks.should_stop() {
            break;
        }
        let (idx_a, idx_b) = (grid.ravel_index(a), grid.ravel_index(b));

        // If cells are not yet connected, remove the wall between them
        if regions.unite(idx_a, idx_b) {
            carve(grid, a, b, hooks);
            merges += 1;
        }
    }
    if merges < merges_needed {
        tracing::debug!("[generate] kruskal stopped after {} of {} merges", merges, merges_needed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{get_rng, tests::assert_perfect};

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(6);
        assert!(uf.unite(0, 1));
        assert!(uf.unite(2, 3));
        assert!(!uf.unite(1, 0));
        assert!(uf.unite(1, 3));
        assert_eq!(uf.find(0), uf.find(2));
        assert_ne!(uf.find(0), uf.find(4));
    }

    #[test]
    fn test_randomized_kruskal() {
        for seed in 0..5 {
            let mut grid = Grid::new(10, 6).unwrap();
            randomized_kruskal(&mut grid, &mut get_rng(Some(seed)), &mut Hooks::none());
            assert_perfect(&grid);
        }
    }
}
