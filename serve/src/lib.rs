//! HTTP + WebSocket server for toolrouter (axum + ws).
//!
//! Listens on `TOOLROUTER_ADDR` (default `127.0.0.1:8000`) and serves:
//!
//! - `GET /`, `GET /health`
//! - `POST /api/v1/query`: one query in, `{query, tool_used, result}` out
//! - `GET /api/v1/ws`: one `{query}` frame in, one `{query, tool_used, response}` frame out
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`].

mod app;
mod connection;
mod cors;
mod protocol;
mod response;
mod rest;

use std::sync::Arc;

use config::Settings;
use tokio::net::TcpListener;
use toolrouter::Orchestrator;
use tracing::info;

use app::{router, AppState};

pub use protocol::{QueryRequest, QueryResponse, WsReply};

/// Runs the server on an existing listener. Used by tests (bind to 127.0.0.1:0 then pass listener)
/// with an orchestrator built over a stub model.
pub async fn run_serve_on_listener(
    listener: TcpListener,
    orchestrator: Arc<Orchestrator>,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    info!("server listening on http://{} (websocket at ws://{}/api/v1/ws)", addr, addr);

    let state = Arc::new(AppState {
        orchestrator,
        app_name: settings.app_name.clone(),
    });
    let app = router(state, cors::cors_layer(&settings.cors_origins));
    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the production orchestrator from `settings` and serves on `settings.addr`.
pub async fn run_serve(settings: &Settings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let orchestrator = Arc::new(Orchestrator::from_settings(settings)?);
    let listener = TcpListener::bind(&settings.addr).await?;
    run_serve_on_listener(listener, orchestrator, settings).await
}
