use std::fmt::{self, Debug, Display};
use num_traits::{Float, Zero};
use serde::Serialize;

use crate::graph::{Graph, NodeId};
use crate::Result;

/// Ordered sequence of nodes from a start node to a finish node
///
/// Consecutive nodes are joined by an edge of the graph the path was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path<N> {
    nodes: Vec<N>,
}

impl<N: NodeId> Path<N> {
    /// Wraps a node sequence, start first; `None` if it is empty
    pub fn new(nodes: Vec<N>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Path { nodes })
        }
    }

    /// Nodes of the path, start first
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn start(&self) -> N {
        self.nodes[0]
    }

    pub fn finish(&self) -> N {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges on the path
    pub fn hop_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Consecutive node pairs along the path
    pub fn edges(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Returns true if the path traverses the undirected edge `(a, b)`
    pub fn uses_edge(&self, a: N, b: N) -> bool {
        self.edges()
            .any(|(u, v)| (u == a && v == b) || (u == b && v == a))
    }
}

impl<N: NodeId> Display for Path<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str("->")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// Trait for point-to-point shortest path searches
pub trait ShortestPathFinder<N, W>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    /// Finds a shortest path from `start` to `finish`.
    ///
    /// Returns `Ok(None)` when `finish` cannot be reached, and an error only
    /// when `start` is not a node of `graph` or the search is aborted.
    fn find_path<G>(&self, graph: &G, start: N, finish: N) -> Result<Option<Path<N>>>
    where
        G: Graph<N, W> + ?Sized;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
