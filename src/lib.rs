//! Emergency Paths - shortest paths that survive edge failures
//!
//! The crate computes a shortest path between two nodes of an undirected
//! weighted graph with a lazy Dijkstra search, and re-routes around a failed
//! edge of that path by searching again on a view of the graph with the edge
//! removed.
//!
//! Weights must be non-negative. Unreachable targets are reported as `None`,
//! never as an error.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod input;
pub mod router;
pub mod web;

pub use algorithm::{dijkstra::Dijkstra, Path, ShortestPathFinder};
/// Re-export main types for convenient use
pub use graph::{UndirectedGraph, WithoutEdge};
pub use input::{EdgeList, EdgeRecord};
pub use router::{EmergencyReport, EmergencyRouter};

use std::time::Duration;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Start node {0} not found in graph")]
    StartNotFound(String),

    #[error("No edge between {0} and {1}")]
    MissingEdge(String, String),

    #[error("Invalid edge weight between {0} and {1}: {2}")]
    InvalidWeight(String, String, f64),

    #[error("Search exceeded its deadline of {0:?}")]
    SearchTimedOut(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed edge list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
