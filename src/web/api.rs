use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use ordered_float::OrderedFloat;
use rand::thread_rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::Path as NodePath;
use crate::graph::generators::{generate_grid, generate_random_connected};
use crate::graph::{Graph, MutableGraph, NodeId, UndirectedGraph};
use crate::input::EdgeList;
use crate::router::{EmergencyReport, EmergencyRouter};
use crate::web::models::*;
use crate::web::server::ServerConfig;
use crate::Error;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    pub max_sessions: usize,
    pub max_nodes: usize,
    pub max_edges: usize,
    pub session_timeout: Duration,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            max_sessions: config.max_sessions,
            max_nodes: config.max_nodes,
            max_edges: config.max_edges,
            session_timeout: Duration::from_secs(config.session_timeout_minutes.saturating_mul(60)),
        }
    }

    /// Locks the session table, dropping sessions older than the timeout first
    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        // Sessions are plain data, a panic elsewhere cannot leave them half-written
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| {
            let age = (now - session.created_at).to_std().unwrap_or_default();
            age < self.session_timeout
        });
        if sessions.len() < before {
            log::info!("expired {} sessions", before - sessions.len());
        }

        sessions
    }

    fn insert_session(&self, graph: WebGraph) -> Result<Session, ApiError> {
        let mut sessions = self.sessions();
        if sessions.len() >= self.max_sessions {
            return Err(api_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "session_limit_reached",
                format!("At most {} sessions may be open", self.max_sessions),
            ));
        }

        let session = Session::new(graph);
        sessions.insert(session.id, session.clone());
        log::info!("created session {} ({} nodes, {} edges)",
            session.id, session.graph.nodes.len(), session.graph.links.len());
        Ok(session)
    }

    fn session_graph(&self, session_id: Uuid) -> Result<WebGraph, ApiError> {
        self.sessions()
            .get(&session_id)
            .map(|session| session.graph.clone())
            .ok_or_else(session_not_found)
    }

    /// Rejects graphs over the configured limits; `None` counts overflowed
    fn check_graph_size(&self, size: Option<(usize, usize)>) -> Result<(), ApiError> {
        match size {
            Some((nodes, edges)) if nodes <= self.max_nodes && edges <= self.max_edges => Ok(()),
            Some((nodes, edges)) => Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_graph_size",
                format!("Graph of {} nodes and {} edges exceeds the limit of {} nodes and {} edges",
                    nodes, edges, self.max_nodes, self.max_edges),
            )),
            None => Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_graph_size",
                "Requested graph size overflows".to_string(),
            )),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}

/// What `generate_graph` was asked to build, once validated
enum Generation {
    Grid { width: usize, height: usize },
    Random { nodes: usize, extra_edges: usize, max_weight: f64 },
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/graphs", post(upload_graph))
        .route("/api/graphs/generate", post(generate_graph))
        .route("/api/graphs/:session_id", get(get_graph))
        .route("/api/routes/:session_id", post(find_routes))
        .route("/api/sessions", get(list_sessions))
        .route("/api/sessions/:session_id", get(get_session).delete(delete_session))
        .route("/api/health", get(health_check))
}

/// Store an uploaded edge list in a new session
pub async fn upload_graph(
    State(state): State<AppState>,
    Json(edges): Json<EdgeList<WebNodeId>>,
) -> Result<Json<Session>, ApiError> {
    state.check_graph_size(Some((0, edges.edges.len())))?;
    let graph = edges.to_graph().map_err(library_error)?;
    state.check_graph_size(Some((graph.node_count(), graph.edge_count())))?;

    let session = state.insert_session(convert_graph_to_web(&graph, |node| node))?;
    Ok(Json(session))
}

/// Generate a new graph
pub async fn generate_graph(
    State(state): State<AppState>,
    Json(request): Json<GraphGenerationRequest>,
) -> Result<Json<Session>, ApiError> {
    let generation = match request.graph_type.as_str() {
        "grid" => {
            let (width, height) = request.grid_dimensions.unwrap_or_else(|| {
                let side = (request.node_count as f64).sqrt().ceil() as usize;
                (side, side)
            });
            state.check_graph_size(grid_size(width, height))?;
            Generation::Grid { width, height }
        }
        "random" => {
            if !(request.max_weight.is_finite() && request.max_weight > 1.0) {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_max_weight",
                    format!("max_weight must be greater than 1, got {}", request.max_weight),
                ));
            }
            let extra_edges = request.extra_edges.checked_mul(request.node_count);
            let edges = extra_edges
                .and_then(|extra| request.node_count.saturating_sub(1).checked_add(extra));
            state.check_graph_size(edges.map(|edges| (request.node_count, edges)))?;
            Generation::Random {
                nodes: request.node_count,
                extra_edges: extra_edges.unwrap_or_default(),
                max_weight: request.max_weight,
            }
        }
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "invalid_graph_type",
                format!("Unknown graph type: {}", request.graph_type),
            ));
        }
    };

    let web_graph = tokio::task::spawn_blocking(move || {
        let graph = match generation {
            Generation::Grid { width, height } => generate_grid(width, height),
            Generation::Random { nodes, extra_edges, max_weight } => {
                generate_random_connected(nodes, extra_edges, max_weight, &mut thread_rng())
            }
        };
        convert_graph_to_web(&graph, |node| node as WebNodeId)
    })
    .await
    .map_err(|err| blocking_task_failed("graph_generation_failed", err))?;

    let session = state.insert_session(web_graph)?;
    Ok(Json(session))
}

/// Get graph data for a session
pub async fn get_graph(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<WebGraph>, ApiError> {
    state.session_graph(session_id).map(Json)
}

/// Compute the original path and its emergency alternatives
pub async fn find_routes(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let graph = state.session_graph(session_id)?;

    let response = tokio::task::spawn_blocking(move || compute_routes(&graph, &request))
        .await
        .map_err(|err| blocking_task_failed("route_computation_failed", err))?
        .map_err(library_error)?;

    Ok(Json(response))
}

/// List all active sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<Uuid>> {
    Json(state.sessions().keys().cloned().collect())
}

/// Get session information
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Session>, ApiError> {
    state
        .sessions()
        .get(&session_id)
        .cloned()
        .map(Json)
        .ok_or_else(session_not_found)
}

/// Close a session and free its slot
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    match state.sessions().remove(&session_id) {
        Some(_) => {
            log::info!("deleted session {}", session_id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(session_not_found()),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// Helper functions

fn compute_routes(web_graph: &WebGraph, request: &RouteRequest) -> crate::Result<RouteResponse> {
    let started_at = Instant::now();

    let mut graph = EdgeList::new(web_graph.edge_records()).to_graph()?;
    for &node in &web_graph.nodes {
        graph.add_node(node);
    }

    let finder = match request.timeout_ms {
        Some(ms) => Dijkstra::new().with_deadline(Duration::from_millis(ms)),
        None => Dijkstra::new(),
    };
    let router = EmergencyRouter::with_finder(graph, request.start, request.finish, finder)?;

    let removed_edges = router.removed_edges_or_path(request.removed_edge);
    let reports = router.emergency_reports(&removed_edges)?;

    let original = match router.original_path() {
        Some(path) => summarize(Some(path), Some(router.path_length(path)?)),
        None => summarize(None, None),
    };

    Ok(RouteResponse {
        execution_id: Uuid::new_v4(),
        start: request.start,
        finish: request.finish,
        original,
        emergencies: reports.into_iter().map(summarize_report).collect(),
        execution_time_ms: started_at.elapsed().as_secs_f64() * 1000.0,
    })
}

fn summarize(path: Option<&NodePath<WebNodeId>>, length: Option<OrderedFloat<f64>>) -> PathSummary {
    PathSummary {
        nodes: path.map(|p| p.nodes().to_vec()),
        distance: length.map(OrderedFloat::into_inner),
    }
}

fn summarize_report(report: EmergencyReport<WebNodeId, OrderedFloat<f64>>) -> EmergencySummary {
    EmergencySummary {
        removed_edge: report.removed_edge,
        path: summarize(report.path.as_ref(), report.length),
    }
}

/// Nodes and edges of a graph, `(nodes, edges)`, for a `width * height` grid
fn grid_size(width: usize, height: usize) -> Option<(usize, usize)> {
    let nodes = width.checked_mul(height)?;
    let horizontal = width.saturating_sub(1).checked_mul(height)?;
    let vertical = height.saturating_sub(1).checked_mul(width)?;
    Some((nodes, horizontal.checked_add(vertical)?))
}

fn convert_graph_to_web<N, F>(graph: &UndirectedGraph<N, OrderedFloat<f64>>, to_web: F) -> WebGraph
where
    N: NodeId,
    F: Fn(N) -> WebNodeId,
{
    let mut nodes: Vec<WebNodeId> = graph.nodes().map(&to_web).collect();
    nodes.sort_unstable();

    let links = graph
        .edges()
        .map(|(source, target, weight)| WebEdge {
            source: to_web(source),
            target: to_web(target),
            weight: weight.into_inner(),
        })
        .collect();

    WebGraph { nodes, links }
}

fn api_error(status: StatusCode, error: &str, message: String) -> ApiError {
    (status, Json(ErrorResponse {
        error: error.to_string(),
        message,
        details: None,
    }))
}

fn blocking_task_failed(code: &str, err: tokio::task::JoinError) -> ApiError {
    log::error!("{}: {}", code, err);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, code, format!("Background task failed: {}", err))
}

fn session_not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "session_not_found", "Session not found".to_string())
}

fn library_error(err: Error) -> ApiError {
    let (status, code) = match &err {
        Error::StartNotFound(_) => (StatusCode::BAD_REQUEST, "start_not_found"),
        Error::InvalidWeight(..) => (StatusCode::BAD_REQUEST, "invalid_weight"),
        Error::MissingEdge(..) => (StatusCode::BAD_REQUEST, "missing_edge"),
        Error::SearchTimedOut(_) => (StatusCode::REQUEST_TIMEOUT, "search_timed_out"),
        Error::Io(_) | Error::Json(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    log::warn!("request failed: {}", err);
    api_error(status, code, err.to_string())
}
