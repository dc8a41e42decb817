//! REST surface: root, health, and `POST /api/v1/query`.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};
use toolrouter::{LlmClient, MockLlm, OFFLINE_GENERAL_REPLY};

use super::common;

#[tokio::test]
async fn health_and_root() {
    let addr = common::spawn_offline_server().await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "healthy"}));

    let root: Value = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root["name"], "toolrouter e2e");
    assert!(root["version"].is_string());
}

#[tokio::test]
async fn query_returns_tool_used_and_result() {
    let addr = common::spawn_offline_server().await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/api/v1/query", addr);

    for (query, tool, result) in [
        ("What is 15 + 27?", "math", "42"),
        (
            "What's the weather in Jakarta?",
            "weather",
            "Mock weather: It's sunny and 22°C in Jakarta",
        ),
        ("Tell me about Python", "llm", OFFLINE_GENERAL_REPLY),
    ] {
        let res = client.post(&url).json(&json!({"query": query})).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(
            body,
            json!({"query": query, "tool_used": tool, "result": result}),
            "{}",
            query
        );
    }
}

/// **Scenario**: A body without `query` or with broken JSON is 422, and the model is never called.
#[tokio::test]
async fn malformed_body_is_unprocessable() {
    let llm = Arc::new(MockLlm::with_text("unused"));
    let addr = common::spawn_server(Arc::clone(&llm) as Arc<dyn LlmClient>).await;
    let client = reqwest::Client::new();
    let url = format!("http://{}/api/v1/query", addr);

    let missing = client.post(&url).json(&json!({"text": "hi"})).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = missing.json().await.unwrap();
    assert!(body["detail"].is_string());

    let broken = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(broken.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn model_failure_is_internal_error() {
    let addr = common::spawn_server(Arc::new(MockLlm::failing("provider down"))).await;
    let res = reqwest::Client::new()
        .post(format!("http://{}/api/v1/query", addr))
        .json(&json!({"query": "What is 1 + 1?"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"].as_str().unwrap().contains("provider down"));
}

/// **Scenario**: A tool failure is still a 200; the error text is the result.
#[tokio::test]
async fn tool_failure_is_ok_with_error_result() {
    let addr = common::spawn_offline_server().await;
    let res = reqwest::Client::new()
        .post(format!("http://{}/api/v1/query", addr))
        .json(&json!({"query": "What is 10 / 0?"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["tool_used"], "math");
    assert_eq!(body["result"], "Error: division by zero");
}
