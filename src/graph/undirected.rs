use crate::graph::traits::{Graph, MutableGraph, NodeId};
use num_traits::{Float, Zero};
use std::collections::HashMap;
use std::fmt::Debug;

/// An undirected graph implementation using adjacency lists
///
/// Every edge is stored twice, once in the list of each endpoint, so that
/// neighbor enumeration never has to scan the whole edge set.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<N, W>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    /// node -> [(neighbor, weight)]
    adjacency: HashMap<N, Vec<(N, W)>>,

    /// Number of undirected edges
    edge_count: usize,
}

impl<N, W> UndirectedGraph<N, W>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        UndirectedGraph {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty graph with room for the given number of nodes
    pub fn with_capacity(nodes: usize) -> Self {
        UndirectedGraph {
            adjacency: HashMap::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Builds a graph from `(a, b, weight)` triples; a later duplicate edge overwrites an earlier one
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, W)>,
    {
        let mut graph = Self::new();
        for (a, b, weight) in edges {
            graph.add_edge(a, b, weight);
        }
        graph
    }

    /// Iterates over every undirected edge once, as `(a, b, weight)` with `a <= b`
    pub fn edges(&self) -> impl Iterator<Item = (N, N, W)> + '_ {
        self.adjacency.iter().flat_map(|(&a, neighbors)| {
            neighbors
                .iter()
                .filter(move |(b, _)| a <= *b)
                .map(move |&(b, weight)| (a, b, weight))
        })
    }

    /// Validate that the graph doesn't have negative weights
    pub fn validate_non_negative(&self) -> bool {
        self.adjacency
            .values()
            .flatten()
            .all(|(_, weight)| *weight >= W::zero())
    }

    fn upsert_half_edge(&mut self, from: N, to: N, weight: W) -> bool {
        let neighbors = self.adjacency.entry(from).or_default();
        match neighbors.iter_mut().find(|(target, _)| *target == to) {
            Some(edge) => {
                edge.1 = weight;
                false
            }
            None => {
                neighbors.push((to, weight));
                true
            }
        }
    }

    fn remove_half_edge(&mut self, from: N, to: N) -> bool {
        match self.adjacency.get_mut(&from) {
            Some(neighbors) => {
                let len_before = neighbors.len();
                neighbors.retain(|(target, _)| *target != to);
                len_before > neighbors.len()
            }
            None => false,
        }
    }
}

impl<N, W> Default for UndirectedGraph<N, W>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, W> Graph<N, W> for UndirectedGraph<N, W>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = N> + '_> {
        Box::new(self.adjacency.keys().copied())
    }

    fn neighbors(&self, node: N) -> Box<dyn Iterator<Item = (N, W)> + '_> {
        if let Some(edges) = self.adjacency.get(&node) {
            Box::new(edges.iter().cloned())
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn has_node(&self, node: N) -> bool {
        self.adjacency.contains_key(&node)
    }

    fn edge_weight(&self, a: N, b: N) -> Option<W> {
        self.adjacency
            .get(&a)?
            .iter()
            .find(|(target, _)| *target == b)
            .map(|(_, weight)| *weight)
    }
}

impl<N, W> MutableGraph<N, W> for UndirectedGraph<N, W>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
{
    fn add_node(&mut self, node: N) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, Vec::new());
        true
    }

    fn add_edge(&mut self, a: N, b: N, weight: W) -> bool {
        if weight.is_nan() || weight < W::zero() {
            return false;
        }

        let inserted = self.upsert_half_edge(a, b, weight);
        // A self-loop lives in a single adjacency list
        if a != b {
            self.upsert_half_edge(b, a, weight);
        }
        if inserted {
            self.edge_count += 1;
        }
        true
    }

    fn remove_edge(&mut self, a: N, b: N) -> bool {
        let removed = self.remove_half_edge(a, b);
        if a != b {
            self.remove_half_edge(b, a);
        }
        if removed {
            self.edge_count -= 1;
        }
        removed
    }
}
