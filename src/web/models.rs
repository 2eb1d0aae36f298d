use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::input::EdgeRecord;

/// Node identifier used by the HTTP API
pub type WebNodeId = i64;

/// An edge as stored in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebEdge {
    pub source: WebNodeId,
    pub target: WebNodeId,
    pub weight: f64,
}

/// A complete graph held by a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebGraph {
    pub nodes: Vec<WebNodeId>,
    pub links: Vec<WebEdge>,
}

/// Parameters for graph generation
#[derive(Debug, Deserialize)]
pub struct GraphGenerationRequest {
    pub graph_type: String,
    pub node_count: usize,
    #[serde(default = "default_extra_edges")]
    pub extra_edges: usize,
    #[serde(default = "default_max_weight")]
    pub max_weight: f64,
    #[serde(default)]
    pub grid_dimensions: Option<(usize, usize)>,
}

fn default_extra_edges() -> usize { 2 }
fn default_max_weight() -> f64 { 10.0 }

/// Parameters for a routing query
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub start: WebNodeId,
    pub finish: WebNodeId,
    /// Edge to fail; every edge of the original path is tried when absent
    #[serde(default)]
    pub removed_edge: Option<(WebNodeId, WebNodeId)>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// A path together with its total weight
#[derive(Debug, Clone, Serialize)]
pub struct PathSummary {
    pub nodes: Option<Vec<WebNodeId>>,
    pub distance: Option<f64>,
}

/// Path found after failing one edge
#[derive(Debug, Clone, Serialize)]
pub struct EmergencySummary {
    pub removed_edge: (WebNodeId, WebNodeId),
    pub path: PathSummary,
}

/// Response to a routing query
#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub execution_id: Uuid,
    pub start: WebNodeId,
    pub finish: WebNodeId,
    pub original: PathSummary,
    pub emergencies: Vec<EmergencySummary>,
    pub execution_time_ms: f64,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session containing graph data
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub graph: WebGraph,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WebGraph) -> Self {
        Self {
            id: Uuid::new_v4(),
            graph,
            created_at: Utc::now(),
        }
    }
}

impl WebGraph {
    /// Collects the edges back into input records
    pub fn edge_records(&self) -> Vec<EdgeRecord<WebNodeId>> {
        self.links
            .iter()
            .map(|link| EdgeRecord::new(link.source, link.target, Some(link.weight)))
            .collect()
    }
}
