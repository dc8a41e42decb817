//! CORS preflight against the default origin list.

use reqwest::Method;

use super::common;

#[tokio::test]
async fn configured_origin_is_allowed_with_credentials() {
    let addr = common::spawn_offline_server().await;
    let res = reqwest::Client::new()
        .request(Method::OPTIONS, format!("http://{}/api/v1/query", addr))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    let headers = res.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    assert_eq!(headers.get("access-control-allow-methods").unwrap(), "POST");
}

#[tokio::test]
async fn unknown_origin_gets_no_allow_header() {
    let addr = common::spawn_offline_server().await;
    let res = reqwest::Client::new()
        .request(Method::OPTIONS, format!("http://{}/api/v1/query", addr))
        .header("Origin", "http://evil.example")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert!(res.headers().get("access-control-allow-origin").is_none());
}
