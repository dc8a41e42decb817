//! Shared helpers for e2e tests. Received frames are logged with `[e2e] received: ...`.
//! Run tests with `--nocapture` to see them.

use std::sync::Arc;
use std::time::Duration;

use config::Settings;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use toolrouter::{HeuristicLlm, LlmClient, Orchestrator, Toolbox};

/// Settings with a dummy model key and mock weather; no network is touched.
pub fn test_settings() -> Settings {
    Settings::from_lookup(|key| match key {
        "OPENAI_API_KEY" => Some("sk-test".to_string()),
        "APP_NAME" => Some("toolrouter e2e".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Bind to a random port and spawn the server over `llm`. Returns `host:port`.
pub async fn spawn_server(llm: Arc<dyn LlmClient>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let orchestrator = Arc::new(Orchestrator::new(llm, Toolbox::mock()).unwrap());
    let settings = test_settings();
    tokio::spawn(async move { serve::run_serve_on_listener(listener, orchestrator, &settings).await });
    addr.to_string()
}

/// Server over the offline rule-based model.
pub async fn spawn_offline_server() -> String {
    spawn_server(Arc::new(HeuristicLlm::new())).await
}

/// Sends one text frame and returns the next reply parsed as JSON.
pub async fn send_and_recv<W, R>(write: &mut W, read: &mut R, text: &str) -> Value
where
    W: SinkExt<Message> + Unpin,
    W::Error: std::fmt::Debug,
    R: StreamExt<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    write.send(Message::Text(text.to_string())).await.unwrap();
    let msg = timeout(Duration::from_secs(10), read.next())
        .await
        .expect("timeout waiting for reply")
        .expect("connection closed")
        .expect("ws error");
    let received = msg.to_text().unwrap().to_string();
    eprintln!("[e2e] received: {}", received);
    serde_json::from_str(&received).unwrap()
}
