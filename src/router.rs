//! Emergency re-routing around failed edges

use std::fmt::Debug;
use std::marker::PhantomData;
use num_traits::{Float, Zero};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithm::{dijkstra::Dijkstra, Path, ShortestPathFinder};
use crate::graph::{Graph, NodeId, UndirectedGraph, WithoutEdge};
use crate::input::EdgeList;
use crate::{Error, Result};

/// Outcome of one emergency query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyReport<N, W> {
    /// The edge assumed to have failed
    pub removed_edge: (N, N),
    /// Shortest path avoiding `removed_edge`, `None` if there is none
    pub path: Option<Path<N>>,
    /// Total weight of `path`
    pub length: Option<W>,
}

/// Holds a graph and the shortest path between two of its nodes, and answers
/// "what if this edge failed" queries without touching the graph.
#[derive(Debug)]
pub struct EmergencyRouter<N, W, G, A = Dijkstra>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
    G: Graph<N, W>,
    A: ShortestPathFinder<N, W>,
{
    graph: G,
    start: N,
    finish: N,
    finder: A,
    original_path: Option<Path<N>>,
    _weight: PhantomData<W>,
}

impl<N, W, G> EmergencyRouter<N, W, G, Dijkstra>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<N, W>,
{
    /// Creates a router using plain Dijkstra and computes the original path
    pub fn new(graph: G, start: N, finish: N) -> Result<Self> {
        Self::with_finder(graph, start, finish, Dijkstra::new())
    }
}

impl<N> EmergencyRouter<N, OrderedFloat<f64>, UndirectedGraph<N, OrderedFloat<f64>>, Dijkstra>
where
    N: NodeId,
{
    /// Builds the graph from an edge list, then behaves like [`EmergencyRouter::new`]
    pub fn from_edges(edges: &EdgeList<N>, start: N, finish: N) -> Result<Self> {
        Self::new(edges.to_graph()?, start, finish)
    }
}

impl<N, W, G, A> EmergencyRouter<N, W, G, A>
where
    N: NodeId,
    W: Float + Zero + Debug + Copy,
    G: Graph<N, W>,
    A: ShortestPathFinder<N, W>,
{
    /// Creates a router with a custom path finder and computes the original path
    pub fn with_finder(graph: G, start: N, finish: N, finder: A) -> Result<Self> {
        if !graph.has_node(start) {
            return Err(Error::StartNotFound(start.to_string()));
        }

        let original_path = finder.find_path(&graph, start, finish)?;
        match &original_path {
            Some(path) => log::debug!("{}: original path {}", finder.name(), path),
            None => log::debug!("{}: no path from {} to {}", finder.name(), start, finish),
        }

        Ok(EmergencyRouter {
            graph,
            start,
            finish,
            finder,
            original_path,
            _weight: PhantomData,
        })
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn start(&self) -> N {
        self.start
    }

    pub fn finish(&self) -> N {
        self.finish
    }

    /// The path computed at construction time
    pub fn original_path(&self) -> Option<&Path<N>> {
        self.original_path.as_ref()
    }

    /// Edges of the original path, in order; empty if there is no original path
    pub fn original_path_edges(&self) -> Vec<(N, N)> {
        self.original_path
            .as_ref()
            .map(|path| path.edges().collect())
            .unwrap_or_default()
    }

    /// The edges to fail: `requested` alone if given, otherwise every edge of the original path
    pub fn removed_edges_or_path(&self, requested: Option<(N, N)>) -> Vec<(N, N)> {
        match requested {
            Some(edge) => vec![edge],
            None => {
                log::info!("No removed edge specified, iterating through all edges on path");
                self.original_path_edges()
            }
        }
    }

    /// Shortest path from start to finish once `removed_edge` is gone.
    ///
    /// Removing an edge the graph does not have changes nothing.
    pub fn find_emergency_path(&self, removed_edge: (N, N)) -> Result<Option<Path<N>>> {
        let (u, v) = removed_edge;
        if !self.graph.has_edge(u, v) {
            log::debug!("edge ({}, {}) is not in the graph, nothing to remove", u, v);
        }

        let view = WithoutEdge::new(&self.graph, removed_edge);
        self.finder.find_path(&view, self.start, self.finish)
    }

    /// Total weight of a path, with every hop looked up in the stored graph
    pub fn path_length(&self, path: &Path<N>) -> Result<W> {
        path.edges().try_fold(W::zero(), |total, (a, b)| {
            self.graph
                .edge_weight(a, b)
                .map(|weight| total + weight)
                .ok_or_else(|| Error::MissingEdge(a.to_string(), b.to_string()))
        })
    }

    fn report(&self, removed_edge: (N, N)) -> Result<EmergencyReport<N, W>> {
        let path = self.find_emergency_path(removed_edge)?;
        let length = path.as_ref().map(|p| self.path_length(p)).transpose()?;
        Ok(EmergencyReport { removed_edge, path, length })
    }
}

impl<N, W, G, A> EmergencyRouter<N, W, G, A>
where
    N: NodeId + Send + Sync,
    W: Float + Zero + Debug + Copy + Send + Sync,
    G: Graph<N, W> + Sync,
    A: ShortestPathFinder<N, W> + Sync,
{
    /// Runs one independent emergency query per edge, in parallel.
    ///
    /// Reports come back in the order of `removed_edges`. The first failing
    /// query (a timed-out search) fails the whole batch.
    pub fn emergency_reports(&self, removed_edges: &[(N, N)]) -> Result<Vec<EmergencyReport<N, W>>> {
        removed_edges
            .par_iter()
            .map(|&edge| self.report(edge))
            .collect()
    }

    /// Emergency reports for the failure of each edge of the original path
    pub fn analyze_path_failures(&self) -> Result<Vec<EmergencyReport<N, W>>> {
        let edges = self.original_path_edges();
        log::debug!("analyzing {} edge failures on the original path", edges.len());
        self.emergency_reports(&edges)
    }
}
