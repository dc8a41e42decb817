//! WebSocket connection lifecycle: recv loop and per-frame dispatch.
//!
//! Every text frame gets exactly one reply frame. Bad frames are answered with an error
//! object and the connection stays open.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use serde_json::Value;
use toolrouter::Orchestrator;
use tracing::{error, info, warn};

use super::protocol::WsReply;
use super::response::send_reply;

pub(crate) async fn handle_socket(mut socket: WebSocket, orchestrator: Arc<Orchestrator>) {
    info!("websocket connection opened");
    while let Some(res) = socket.recv().await {
        let msg = match res {
            Ok(m) => m,
            Err(e) => {
                warn!("read error (client closed?): {}", e);
                let _ = socket.close().await;
                break;
            }
        };
        let text = match &msg {
            Message::Text(t) => t.clone(),
            Message::Binary(b) => String::from_utf8_lossy(b).into_owned(),
            Message::Close(_) => break,
            _ => continue,
        };

        let reply = handle_frame(&text, &orchestrator).await;
        if let Err(e) = send_reply(&mut socket, &reply).await {
            warn!("send error: {}", e);
            let _ = socket.close().await;
            break;
        }
    }
    info!("websocket client disconnected");
}

async fn handle_frame(text: &str, orchestrator: &Orchestrator) -> WsReply {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "websocket frame is not valid JSON");
            return WsReply::invalid_json(e.to_string());
        }
    };
    // A non-string `query` counts as missing.
    let Some(query) = value.get("query").and_then(Value::as_str) else {
        warn!("websocket message missing 'query' field");
        return WsReply::missing_query();
    };

    info!(query = %query, "websocket query received");
    match orchestrator.handle_query(query).await {
        Ok(outcome) => {
            info!(tool_used = %outcome.tool_used, "websocket query processed");
            WsReply::answer(query.to_string(), outcome)
        }
        Err(e) => {
            error!(error = %e, "websocket query failed");
            WsReply::processing_failed(e.to_string())
        }
    }
}
