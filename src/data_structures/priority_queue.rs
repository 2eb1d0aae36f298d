use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// A min-first queue of `(node, tentative distance)` entries with lazy deletion
///
/// Keys are never decreased in place. A node is pushed again whenever its
/// distance improves; the superseded entries stay in the heap and are dropped
/// by [`DistanceQueue::pop_unsettled`] once their node has been settled.
#[derive(Debug)]
pub struct DistanceQueue<V, P>
where
    V: Copy + Eq + Hash + Debug + Ord,
    P: Copy + Debug + Ord,
{
    heap: BinaryHeap<Reverse<(P, V)>>,
    stale_pops: usize,
}

impl<V, P> DistanceQueue<V, P>
where
    V: Copy + Eq + Hash + Debug + Ord,
    P: Copy + Debug + Ord,
{
    pub fn new() -> Self {
        DistanceQueue {
            heap: BinaryHeap::new(),
            stale_pops: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale ones included
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Queues `vertex` at `distance`, leaving any older entry for it in place
    pub fn push(&mut self, vertex: V, distance: P) {
        self.heap.push(Reverse((distance, vertex)));
    }

    /// Pops the closest node that is not in `settled`.
    ///
    /// Entries for settled nodes are discarded on the way and counted in
    /// [`DistanceQueue::stale_pops`]. Equal distances pop the smaller node first.
    pub fn pop_unsettled(&mut self, settled: &HashSet<V>) -> Option<(V, P)> {
        while let Some(Reverse((distance, vertex))) = self.heap.pop() {
            if settled.contains(&vertex) {
                self.stale_pops += 1;
                continue;
            }
            return Some((vertex, distance));
        }
        None
    }

    /// Superseded entries discarded so far
    pub fn stale_pops(&self) -> usize {
        self.stale_pops
    }
}

impl<V, P> Default for DistanceQueue<V, P>
where
    V: Copy + Eq + Hash + Debug + Ord,
    P: Copy + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
