use futures_util::StreamExt;
use tokio_tungstenite::connect_async;

use super::common;

/// **Scenario**: A frame that is not JSON gets an error reply; the next frame is still served.
#[tokio::test]
async fn e2e_invalid_json_returns_error() {
    let addr = common::spawn_offline_server().await;
    let (ws, _) = connect_async(format!("ws://{}/api/v1/ws", addr)).await.unwrap();
    let (mut write, mut read) = ws.split();

    let err = common::send_and_recv(&mut write, &mut read, "not valid json").await;
    assert_eq!(err["error"], "Invalid JSON");
    assert!(err["message"].is_string());

    let ok = common::send_and_recv(&mut write, &mut read, r#"{"query":"What is 2 * 3?"}"#).await;
    assert_eq!(ok["tool_used"], "math");
    assert_eq!(ok["response"], "6");
}
