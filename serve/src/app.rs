//! Axum app: shared state and router.
//!
//! Routes: `GET /` and `GET /health` (no core logic), `POST {API_PREFIX}/query` (REST) and
//! `GET {API_PREFIX}/ws` (WebSocket upgrade, handled by [`handle_socket`]).

use std::sync::Arc;

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    routing::{get, post},
    Router,
};
use toolrouter::Orchestrator;
use tower_http::cors::CorsLayer;

use super::connection::handle_socket;
use super::rest::{health, query, root};

pub(crate) const API_PREFIX: &str = "/api/v1";

/// Shared state for every request and connection.
///
/// The orchestrator is built once at startup; each request gets its own conversation state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) orchestrator: Arc<Orchestrator>,
    /// Reported by `GET /`.
    pub(crate) app_name: String,
}

pub(crate) fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(&format!("{}/query", API_PREFIX), post(query))
        .route(&format!("{}/ws", API_PREFIX), get(ws_handler))
        .with_state(state)
        .layer(cors)
}

/// Handles `GET /api/v1/ws`: upgrades to WebSocket and delegates to [`handle_socket`].
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    let orchestrator = Arc::clone(&state.orchestrator);
    ws.on_upgrade(move |socket| handle_socket(socket, orchestrator))
}
