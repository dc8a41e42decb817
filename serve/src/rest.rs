//! REST handlers: root info, health probe, and `POST /api/v1/query`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, warn};

use super::app::AppState;
use super::protocol::{QueryRequest, QueryResponse};

pub(crate) async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": state.app_name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Runs one query. Malformed bodies are 422; model-call failures are 500. Tool failures
/// arrive as a normal 200 with the error text in `result`.
pub(crate) async fn query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected query body");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": rejection.body_text() })),
            )
                .into_response();
        }
    };

    info!(query = %request.query, "received query request");
    match state.orchestrator.handle_query(&request.query).await {
        Ok(outcome) => {
            info!(tool_used = %outcome.tool_used, "query processed");
            Json(QueryResponse::new(request.query, outcome)).into_response()
        }
        Err(e) => {
            error!(error = %e, "query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
