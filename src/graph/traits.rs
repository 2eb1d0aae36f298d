use std::fmt::{Debug, Display};
use std::hash::Hash;
use num_traits::{Float, Zero};

/// Bounds required of a node identifier
///
/// Identifiers are opaque: they only need to be copied, hashed, compared and
/// printed. Any type meeting the bounds implements the trait automatically.
pub trait NodeId: Copy + Eq + Hash + Ord + Debug + Display {}

impl<T> NodeId for T where T: Copy + Eq + Hash + Ord + Debug + Display {}

/// Trait representing a weighted undirected graph
pub trait Graph<N, W>: Debug
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of undirected edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over every node of the graph
    fn nodes(&self) -> Box<dyn Iterator<Item = N> + '_>;

    /// Returns an iterator over the neighbors of a node with the connecting edge weight
    fn neighbors(&self, node: N) -> Box<dyn Iterator<Item = (N, W)> + '_>;

    /// Returns true if the node exists in the graph
    fn has_node(&self, node: N) -> bool;

    /// Gets the weight of the edge between two nodes if it exists
    fn edge_weight(&self, a: N, b: N) -> Option<W>;

    /// Returns true if there's an edge between the two nodes
    fn has_edge(&self, a: N, b: N) -> bool {
        self.edge_weight(a, b).is_some()
    }
}

/// Trait for mutable graph operations
pub trait MutableGraph<N, W>: Graph<N, W>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    /// Adds an isolated node; returns false if it was already present
    fn add_node(&mut self, node: N) -> bool;

    /// Adds an undirected edge, overwriting the weight of an existing one.
    /// Returns false if the weight is negative or not a number.
    fn add_edge(&mut self, a: N, b: N, weight: W) -> bool;

    /// Removes an edge from the graph, keeping both endpoints
    fn remove_edge(&mut self, a: N, b: N) -> bool;
}
