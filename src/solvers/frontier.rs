use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::maze::Coord;

/// Frontier priority: compared on `primary`, then `secondary`, then `tertiary`.
/// Plain searches leave the tie keys at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PriorityKey {
    pub primary: f64,
    pub secondary: f64,
    pub tertiary: f64,
}

impl PriorityKey {
    pub const fn new(primary: f64) -> Self {
        PriorityKey {
            primary,
            secondary: 0.0,
            tertiary: 0.0,
        }
    }

    pub const fn with_ties(primary: f64, secondary: f64, tertiary: f64) -> Self {
        PriorityKey {
            primary,
            secondary,
            tertiary,
        }
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| self.secondary.total_cmp(&other.secondary))
            .then_with(|| self.tertiary.total_cmp(&other.tertiary))
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: PriorityKey,
    /// Insertion order; equal keys pop first-in first-out.
    seq: u64,
    cell: Coord,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-priority frontier with lazy deletion.
///
/// A cell whose cost improves is pushed again rather than re-keyed in place.
/// Stale copies stay in the heap and are dropped by [`Frontier::pop_open`]
/// once their cell has been closed.
#[derive(Debug, Default)]
pub struct Frontier {
    // Using Reverse to turn the max-heap into a min-heap
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
    insertions: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cell: Coord, key: PriorityKey) {
        self.heap.push(Reverse(Entry {
            key,
            seq: self.next_seq,
            cell,
        }));
        self.next_seq += 1;
        self.insertions += 1;
    }

    /// Pops the best entry whose cell is not closed, discarding closed ones
    /// on the way.
    pub fn pop_open<F>(&mut self, is_closed: F) -> Option<(Coord, PriorityKey)>
    where
        F: Fn(Coord) -> bool,
    {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if is_closed(entry.cell) {
                continue;
            }
            return Some((entry.cell, entry.key));
        }
        None
    }

    /// Entries in the heap, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes so far.
    pub fn insertions(&self) -> usize {
        self.insertions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_in_key_order() {
        let mut frontier = Frontier::new();
        frontier.push(Coord::new(0, 0), PriorityKey::new(3.0));
        frontier.push(Coord::new(0, 1), PriorityKey::new(1.0));
        frontier.push(Coord::new(0, 2), PriorityKey::new(2.0));
        let order: Vec<_> = std::iter::from_fn(|| frontier.pop_open(|_| false))
            .map(|(cell, _)| cell.col)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_use_secondary_keys_then_fifo() {
        let mut frontier = Frontier::new();
        frontier.push(Coord::new(0, 0), PriorityKey::with_ties(5.0, 2.0, 0.0));
        frontier.push(Coord::new(0, 1), PriorityKey::with_ties(5.0, 1.0, 9.0));
        frontier.push(Coord::new(0, 2), PriorityKey::with_ties(5.0, 1.0, 3.0));
        frontier.push(Coord::new(0, 3), PriorityKey::with_ties(5.0, 1.0, 3.0));
        let order: Vec<_> = std::iter::from_fn(|| frontier.pop_open(|_| false))
            .map(|(cell, _)| cell.col)
            .collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_lazy_deletion_skips_closed() {
        let mut frontier = Frontier::new();
        let stale = Coord::new(1, 1);
        frontier.push(stale, PriorityKey::new(4.0));
        // Better duplicate for the same cell
        frontier.push(stale, PriorityKey::new(2.0));
        frontier.push(Coord::new(2, 2), PriorityKey::new(3.0));
        assert_eq!(frontier.insertions(), 3);

        let mut closed = vec![];
        let (first, key) = frontier.pop_open(|c| closed.contains(&c)).unwrap();
        assert_eq!((first, key.primary), (stale, 2.0));
        closed.push(first);

        let (second, _) = frontier.pop_open(|c| closed.contains(&c)).unwrap();
        assert_eq!(second, Coord::new(2, 2));
        closed.push(second);

        // Only the stale copy is left and it gets discarded
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.pop_open(|c| closed.contains(&c)), None);
        assert!(frontier.is_empty());
    }
}
