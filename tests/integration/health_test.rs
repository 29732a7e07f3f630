//! Integration tests for health endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_returns_ok() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(response.body["data"]["version"].is_string());
}

#[tokio::test]
async fn test_detailed_health_reports_providers() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health/detailed").await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["status"], "ok");
    assert_eq!(data["repository_provider"], "memory");
    assert_eq!(data["storage_provider"], "memory");
    assert_eq!(data["repository"], "connected");
    assert_eq!(data["storage"], "connected");
    assert_eq!(data["share_count"], 0);
}

#[tokio::test]
async fn test_detailed_health_counts_shares() {
    let app = TestApp::new().await;
    app.create_text_share("counted by health").await;

    let response = app.request("GET", "/api/health/detailed").await;
    assert_eq!(response.body["data"]["share_count"], 1);
}
