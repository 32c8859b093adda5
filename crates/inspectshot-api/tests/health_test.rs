//! Health, fallback and documentation endpoint tests.

mod helpers;

use helpers::{setup_test_app, TEST_BUCKET};
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_storage_target() {
    let app = setup_test_app().await;

    for path in ["/", "/health"] {
        let response = app.client().get(path).await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "inspectshot");
        assert_eq!(body["bucket"], TEST_BUCKET);
        assert_eq!(body["region"], "ap-south-1");
        assert_eq!(body["endpoint"], Value::Null);
        assert_eq!(body["backend"], "s3");
    }
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = setup_test_app().await;

    let response = app.client().get("/no-such-endpoint").await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Endpoint not found");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "req-123")
        .await;

    assert_eq!(response.header("X-Request-ID"), "req-123");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["paths"]["/upload-batch"]["post"].is_object());
}
