//! Integration tests for the health and readiness probes.

mod common;

use common::{google_config, spawn_app};
use reqwest::Client;

#[tokio::test]
async fn health_check_returns_ok_when_key_is_configured() {
    let port = spawn_app(google_config("test-key", "http://localhost:0".to_string())).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "gemini-proxy-service");
}

#[tokio::test]
async fn health_check_reports_unhealthy_without_key() {
    let port = spawn_app(google_config("", "http://localhost:0".to_string())).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn readiness_check_reflects_key_configuration() {
    let ready_port = spawn_app(google_config("test-key", "http://localhost:0".to_string())).await;
    let unready_port = spawn_app(google_config("", "http://localhost:0".to_string())).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/ready", ready_port))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("http://localhost:{}/ready", unready_port))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 503);
}
