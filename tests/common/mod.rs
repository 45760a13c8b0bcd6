use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use quill::router::init_router;
use quill::state::AppState;
use quill_config::{AppConfig, JwtConfig, PasswordConfig};
use quill_db::{MemoryStore, Repositories};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        // bcrypt's minimum cost keeps the suite fast
        password: PasswordConfig { bcrypt_cost: 4 },
        ..AppConfig::default()
    }
}

/// A router over a fresh in-memory store. The store is returned so tests can
/// inspect what was written.
pub fn setup_test_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::new(Repositories::in_memory(store.clone()), &test_config());
    (init_router(state, None), store)
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Creates a user through the API and returns its JSON.
#[allow(dead_code)]
pub async fn create_user(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({
            "name": name,
            "email": generate_unique_email(),
            "password": "pass123"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

/// Creates a post through the API and returns its JSON.
#[allow(dead_code)]
pub async fn create_post(app: &Router, author_id: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/posts",
        Some(json!({
            "title": title,
            "content": "Post body",
            "authorId": author_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}
