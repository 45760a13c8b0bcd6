mod common;

use axum::http::{Method, StatusCode};
use common::{send, setup_test_app};

#[tokio::test]
async fn test_health() {
    let (app, _) = setup_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = setup_test_app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Quill API");
    assert!(body["paths"]["/auth/register"].is_object());
}

#[tokio::test]
async fn test_metrics_not_mounted_without_recorder() {
    let (app, _) = setup_test_app();
    let (status, _) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resources_are_mounted_at_the_root() {
    let (app, _) = setup_test_app();

    let (status, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());

    let (status, _) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
