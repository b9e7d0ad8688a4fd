//! Health Check and Metrics API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["status"], "alive");
}

#[tokio::test]
async fn test_readiness_probe_reports_storage() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    let json: Value = response.json();
    assert_eq!(json["storage"]["backend"], "memory");
    assert_ne!(json["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_request_counters() {
    let app = TestApp::new();
    app.get("/api/v1/branches").await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = String::from_utf8(response.body).unwrap();
    assert!(body.contains("branch_service_http_requests_total"));
}
