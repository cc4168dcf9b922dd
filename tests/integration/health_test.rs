//! Integration tests for the health endpoint.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_store_and_counts() {
    let app = TestApp::new().await;
    app.lock("1", "U1", 60).await;
    app.lock("2", "U2", 10).await;
    app.clock.advance_secs(30);

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["ok"], true);
    assert!(response.body["version"].is_string());
    assert!(response.body["uptime"].is_number());
    assert_eq!(response.body["store"]["provider"], "memory");
    assert_eq!(response.body["store"]["reachable"], true);
    assert_eq!(response.body["seats"]["total"], 2);
    assert_eq!(response.body["seats"]["held"], 1);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = TestApp::new().await;
    let response = app.get("/buildings").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
