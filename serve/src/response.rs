//! Send a single `WsReply` as JSON over the WebSocket.

use axum::extract::ws::{Message, WebSocket};

use super::protocol::WsReply;

const SERIALIZATION_ERROR: &str = r#"{"error":"serialization error"}"#;

pub(crate) async fn send_reply(
    socket: &mut WebSocket,
    reply: &WsReply,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json = serde_json::to_string(reply).unwrap_or_else(|_| SERIALIZATION_ERROR.to_string());
    socket.send(Message::Text(json)).await?;
    Ok(())
}
