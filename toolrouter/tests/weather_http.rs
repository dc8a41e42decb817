//! Weather lookup over HTTP against a local stub of the OpenWeatherMap endpoint.
//!
//! The stub listens on `127.0.0.1:0`, answers `appid=good` with a fixed body and anything
//! else with 401.


use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use env_config::WeatherSettings;
use serde_json::json;
use tokio::net::TcpListener;
use toolrouter::{LlmClient, MockLlm, Orchestrator, ToolError, ToolUsed, Toolbox, WeatherLookup};

async fn stub_weather(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("appid").map(String::as_str) != Some("good")
        || params.get("units").map(String::as_str) != Some("metric")
    {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid API key"})));
    }
    let city = params.get("q").cloned().unwrap_or_default();
    let (temp, country) = if city == "Paris" {
        (json!(18.5), "FR")
    } else {
        (json!(31), "ID")
    };
    (
        StatusCode::OK,
        Json(json!({
            "main": {"temp": temp},
            "weather": [{"description": "scattered clouds"}],
            "sys": {"country": country}
        })),
    )
}

async fn spawn_stub() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/weather", get(stub_weather));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}/weather", addr)
}

fn lookup(base_url: String, key: &str) -> WeatherLookup {
    WeatherLookup::new(WeatherSettings {
        api_key: Some(key.to_string()),
        base_url,
    })
}

#[tokio::test]
async fn live_lookup_formats_description_temperature_and_country() {
    let url = spawn_stub().await;
    let weather = lookup(url, "good");
    assert_eq!(
        weather.lookup("Jakarta").await.unwrap(),
        "It's scattered clouds and 31°C in Jakarta, ID."
    );
    assert_eq!(
        weather.lookup("Paris").await.unwrap(),
        "It's scattered clouds and 18.5°C in Paris, FR."
    );
}

#[tokio::test]
async fn non_success_status_is_http_error() {
    let url = spawn_stub().await;
    let err = lookup(url, "bad").lookup("Jakarta").await.unwrap_err();
    assert!(matches!(err, ToolError::Http(_)), "{:?}", err);
}

/// **Scenario**: Through the orchestrator a failed lookup is still a successful query.
#[tokio::test]
async fn orchestrator_reports_lookup_failure_as_result() {
    let url = spawn_stub().await;
    let llm = Arc::new(MockLlm::route_then_tool(
        "weather",
        "weather_tool",
        json!({"location": "Jakarta"}),
    ));
    let o = Orchestrator::new(
        Arc::clone(&llm) as Arc<dyn LlmClient>,
        Toolbox::new(lookup(url, "bad")),
    )
    .unwrap();
    let out = o.handle_query("What's the weather in Jakarta?").await.unwrap();
    assert_eq!(out.tool_used, ToolUsed::Weather);
    assert!(
        out.result.starts_with("Error processing tool query: weather request failed"),
        "{}",
        out.result
    );
}

#[tokio::test]
async fn orchestrator_live_lookup_success() {
    let url = spawn_stub().await;
    let llm = Arc::new(MockLlm::route_then_tool(
        "weather",
        "weather_tool",
        json!({"location": "Jakarta"}),
    ));
    let o = Orchestrator::new(
        Arc::clone(&llm) as Arc<dyn LlmClient>,
        Toolbox::new(lookup(url, "good")),
    )
    .unwrap();
    let out = o.handle_query("What's the weather in Jakarta?").await.unwrap();
    assert_eq!(out.result, "It's scattered clouds and 31°C in Jakarta, ID.");
}
