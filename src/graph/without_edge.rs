use crate::graph::traits::{Graph, NodeId};
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// A read-only view of a graph with one undirected edge hidden
///
/// The view borrows the underlying graph instead of copying it, so any number
/// of views over the same graph can be searched at once from different threads.
/// Hiding an edge that does not exist leaves the view equivalent to the graph.
#[derive(Debug)]
pub struct WithoutEdge<'a, N, G> {
    graph: &'a G,
    removed: (N, N),
}

impl<'a, N, G> WithoutEdge<'a, N, G>
where
    N: NodeId,
{
    /// Creates a view of `graph` without the edge `removed`
    pub fn new(graph: &'a G, removed: (N, N)) -> Self {
        WithoutEdge { graph, removed }
    }

    /// The hidden edge
    pub fn removed_edge(&self) -> (N, N) {
        self.removed
    }

    fn is_removed(&self, a: N, b: N) -> bool {
        let (u, v) = self.removed;
        (a == u && b == v) || (a == v && b == u)
    }
}

impl<'a, N, W, G> Graph<N, W> for WithoutEdge<'a, N, G>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy + 'a,
    G: Graph<N, W>,
{
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        let (u, v) = self.removed;
        if self.graph.has_edge(u, v) {
            self.graph.edge_count() - 1
        } else {
            self.graph.edge_count()
        }
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = N> + '_> {
        self.graph.nodes()
    }

    fn neighbors(&self, node: N) -> Box<dyn Iterator<Item = (N, W)> + '_> {
        Box::new(
            self.graph
                .neighbors(node)
                .filter(move |(neighbor, _)| !self.is_removed(node, *neighbor)),
        )
    }

    fn has_node(&self, node: N) -> bool {
        self.graph.has_node(node)
    }

    fn edge_weight(&self, a: N, b: N) -> Option<W> {
        if self.is_removed(a, b) {
            None
        } else {
            self.graph.edge_weight(a, b)
        }
    }
}
