//! Edge list input
//!
//! Graphs arrive as JSON edge lists:
//!
//! ```json
//! {"edges": [[1, 2, {"weight": 2}], [5, 6, {}], [7, 8]]}
//! ```
//!
//! The attribute object and its `weight` are optional; a missing weight counts as 1.

use ordered_float::OrderedFloat;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path as FsPath;

use crate::graph::{MutableGraph, NodeId, UndirectedGraph};
use crate::{Error, Result};

/// Weight assumed for edges that carry none
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Optional attributes attached to an edge
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// One undirected edge of the input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEdge<N>", into = "RawEdge<N>")]
#[serde(bound(deserialize = "N: DeserializeOwned + Copy", serialize = "N: Serialize + Copy"))]
pub struct EdgeRecord<N> {
    pub a: N,
    pub b: N,
    pub attributes: EdgeAttributes,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawEdge<N> {
    WithAttributes(N, N, EdgeAttributes),
    Bare(N, N),
}

impl<N> From<RawEdge<N>> for EdgeRecord<N> {
    fn from(raw: RawEdge<N>) -> Self {
        match raw {
            RawEdge::WithAttributes(a, b, attributes) => EdgeRecord { a, b, attributes },
            RawEdge::Bare(a, b) => EdgeRecord { a, b, attributes: EdgeAttributes::default() },
        }
    }
}

impl<N> From<EdgeRecord<N>> for RawEdge<N> {
    fn from(edge: EdgeRecord<N>) -> Self {
        RawEdge::WithAttributes(edge.a, edge.b, edge.attributes)
    }
}

impl<N> EdgeRecord<N> {
    pub fn new(a: N, b: N, weight: Option<f64>) -> Self {
        EdgeRecord { a, b, attributes: EdgeAttributes { weight } }
    }

    /// The edge weight, falling back to [`DEFAULT_WEIGHT`]
    pub fn weight(&self) -> f64 {
        self.attributes.weight.unwrap_or(DEFAULT_WEIGHT)
    }
}

impl<N: fmt::Display> fmt::Display for EdgeRecord<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}, weight: {}", self.a, self.b, self.weight())
    }
}

/// A whole input graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "N: DeserializeOwned + Copy", serialize = "N: Serialize + Copy"))]
pub struct EdgeList<N> {
    pub edges: Vec<EdgeRecord<N>>,
}

impl<N> EdgeList<N>
where
    N: NodeId + DeserializeOwned,
{
    /// Parses an edge list from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads an edge list from a JSON file
    pub fn load<P: AsRef<FsPath>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let list: Self = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("loaded {} edges from {}", list.edges.len(), path.as_ref().display());
        Ok(list)
    }
}

impl<N> EdgeList<N>
where
    N: NodeId,
{
    pub fn new(edges: Vec<EdgeRecord<N>>) -> Self {
        EdgeList { edges }
    }

    /// Builds the graph, rejecting negative and non-finite weights
    pub fn to_graph(&self) -> Result<UndirectedGraph<N, OrderedFloat<f64>>> {
        let mut graph = UndirectedGraph::with_capacity(self.edges.len());

        for edge in &self.edges {
            let weight = edge.weight();
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeight(edge.a.to_string(), edge.b.to_string(), weight));
            }
            graph.add_edge(edge.a, edge.b, OrderedFloat(weight));
        }

        Ok(graph)
    }
}

impl EdgeList<i64> {
    /// Reads `path` when given, otherwise falls back to [`EdgeList::sample`]
    pub fn load_or_sample<P: AsRef<FsPath>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("No input path, using default test data");
                Ok(Self::sample())
            }
        }
    }

    /// A small road-like network used when no input file is given
    pub fn sample() -> Self {
        let edges = [
            (1, 2, 2.0),
            (2, 3, 1.0),
            (3, 4, 5.0),
            (1, 3, 6.0),
            (2, 4, 4.0),
            (4, 5, 70.0),
            (5, 6, 2.3),
            (6, 7, 3.2),
            (7, 8, 2.8),
            (3, 5, 2.8),
            (1, 7, 2.0),
            (5, 9, 5.0),
        ];

        EdgeList {
            edges: edges
                .iter()
                .map(|&(a, b, weight)| EdgeRecord::new(a, b, Some(weight)))
                .collect(),
        }
    }
}
