//! WebSocket surface: one reply frame per query frame, errors keep the connection open.

use std::sync::Arc;

use futures_util::StreamExt;
use serde_json::json;
use tokio_tungstenite::connect_async;
use toolrouter::MockLlm;

use super::common;

#[tokio::test]
async fn answers_several_queries_on_one_connection() {
    let addr = common::spawn_offline_server().await;
    let (ws, _) = connect_async(format!("ws://{}/api/v1/ws", addr)).await.unwrap();
    let (mut write, mut read) = ws.split();

    let math =
        common::send_and_recv(&mut write, &mut read, r#"{"query":"What is 25 + 17?"}"#).await;
    assert_eq!(
        math,
        json!({"query": "What is 25 + 17?", "tool_used": "math", "response": "42"})
    );

    let weather = common::send_and_recv(
        &mut write,
        &mut read,
        r#"{"query":"What's the weather in Paris?"}"#,
    )
    .await;
    assert_eq!(weather["tool_used"], "weather");
    assert!(weather["response"].as_str().unwrap().contains("°C"));

    let general =
        common::send_and_recv(&mut write, &mut read, r#"{"query":"Tell me about Python"}"#).await;
    assert_eq!(general["tool_used"], "llm");
}

#[tokio::test]
async fn missing_query_field_is_reported_and_connection_stays_open() {
    let addr = common::spawn_offline_server().await;
    let (ws, _) = connect_async(format!("ws://{}/api/v1/ws", addr)).await.unwrap();
    let (mut write, mut read) = ws.split();

    let err = common::send_and_recv(&mut write, &mut read, r#"{"not_query":"test"}"#).await;
    assert_eq!(err, json!({"error": "Missing 'query' field in message"}));

    let ok = common::send_and_recv(&mut write, &mut read, r#"{"query":"calculate 6 * 7"}"#).await;
    assert_eq!(ok["response"], "42");
}

#[tokio::test]
async fn model_failure_is_processing_error() {
    let addr = common::spawn_server(Arc::new(MockLlm::failing("provider down"))).await;
    let (ws, _) = connect_async(format!("ws://{}/api/v1/ws", addr)).await.unwrap();
    let (mut write, mut read) = ws.split();

    let err = common::send_and_recv(&mut write, &mut read, r#"{"query":"hello"}"#).await;
    assert_eq!(err["error"], "Error processing query");
    assert!(err["message"].as_str().unwrap().contains("provider down"));
}
