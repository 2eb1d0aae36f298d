use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::time::{Duration, Instant};
use num_traits::{Float, Zero};

use crate::graph::{Graph, NodeId};
use crate::algorithm::{Path, ShortestPathFinder};
use crate::data_structures::DistanceQueue;
use crate::{Error, Result};

/// Best known distance and predecessor of a node during one search
#[derive(Debug, Clone, Copy)]
struct NodeInfo<N, W> {
    /// `None` stands for infinity
    distance: Option<W>,
    predecessor: Option<N>,
}

impl<N, W> NodeInfo<N, W> {
    fn unreached() -> Self {
        NodeInfo {
            distance: None,
            predecessor: None,
        }
    }
}

/// Counters collected during one search, logged at debug level
#[derive(Debug, Default)]
struct SearchStats {
    settled: usize,
    relaxations: usize,
}

/// Lazy point-to-point Dijkstra search
///
/// The search settles nodes in order of distance and stops as soon as the
/// finish node becomes current. Distance improvements push a fresh queue entry
/// and the superseded one is skipped when popped. All working state is local
/// to a call, so one instance can serve concurrent searches.
#[derive(Debug, Default, Clone)]
pub struct Dijkstra {
    deadline: Option<Duration>,
}

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra { deadline: None }
    }

    /// Bounds each search to the given wall-clock budget
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

impl<N, W> ShortestPathFinder<N, W> for Dijkstra
where
    N: NodeId,
    W: Float + Zero + Debug + Copy + Ord,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn find_path<G>(&self, graph: &G, start: N, finish: N) -> Result<Option<Path<N>>>
    where
        G: Graph<N, W> + ?Sized,
    {
        if !graph.has_node(start) {
            return Err(Error::StartNotFound(start.to_string()));
        }

        let started_at = Instant::now();
        let mut stats = SearchStats::default();

        let mut node_info: HashMap<N, NodeInfo<N, W>> = graph
            .nodes()
            .map(|node| (node, NodeInfo::unreached()))
            .collect();
        node_info.insert(start, NodeInfo { distance: Some(W::zero()), predecessor: None });

        let mut visited: HashSet<N> = HashSet::new();
        let mut queue = DistanceQueue::new();

        let mut current = start;
        let mut current_distance = W::zero();

        while current != finish {
            if let Some(deadline) = self.deadline {
                if started_at.elapsed() > deadline {
                    return Err(Error::SearchTimedOut(deadline));
                }
            }

            visited.insert(current);
            stats.settled += 1;

            for (neighbor, weight) in graph.neighbors(current) {
                if visited.contains(&neighbor) {
                    continue;
                }

                let candidate = weight + current_distance;
                let info = node_info.entry(neighbor).or_insert_with(NodeInfo::unreached);
                let improves = match info.distance {
                    None => true,
                    Some(known) => candidate < known,
                };

                if improves {
                    info.distance = Some(candidate);
                    info.predecessor = Some(current);
                    queue.push(neighbor, candidate);
                    stats.relaxations += 1;
                }
            }

            match queue.pop_unsettled(&visited) {
                Some((node, distance)) => {
                    current = node;
                    current_distance = distance;
                }
                None => {
                    log::debug!(
                        "no path from {} to {} ({} nodes settled, {} relaxations, {} stale entries)",
                        start, finish, stats.settled, stats.relaxations, queue.stale_pops()
                    );
                    return Ok(None);
                }
            }
        }

        log::debug!(
            "path from {} to {} found ({} nodes settled, {} relaxations, {} stale entries)",
            start, finish, stats.settled, stats.relaxations, queue.stale_pops()
        );

        Ok(Path::new(rebuild_path(&node_info, finish)))
    }
}

/// Walks predecessor links back from `finish` and returns the nodes start-first
fn rebuild_path<N, W>(node_info: &HashMap<N, NodeInfo<N, W>>, finish: N) -> Vec<N>
where
    N: NodeId,
{
    let mut nodes = vec![finish];
    let mut current = finish;

    while let Some(previous) = node_info.get(&current).and_then(|info| info.predecessor) {
        nodes.push(previous);
        current = previous;
    }

    nodes.reverse();
    nodes
}
