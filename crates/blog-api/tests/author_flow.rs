//! 전체 라우터를 통한 작성자 시나리오 테스트 (인메모리 저장소).

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use blog_api::openapi::swagger_ui_router;
use blog_api::{create_api_router, AppState, MemoryAuthorStore};
use blog_core::AuthConfig;

const SECRET: &str = "integration-test-secret-which-is-comfortably-longer-than-sixty-four-bytes";

fn app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryAuthorStore::new()),
        &AuthConfig::with_secret(SECRET),
    );
    Router::new()
        .merge(create_api_router().with_state(Arc::new(state)))
        .merge(swagger_ui_router())
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn register_login_read_delete() {
    let app = app();

    let (status, registered) = call(
        &app,
        post_json(
            "/api/authors/register",
            json!({ "authorName": "Ada", "email": "ada@example.com", "password": "analytical" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = registered["id"].as_i64().unwrap();

    let (status, login) = call(
        &app,
        post_json(
            "/api/authors/login",
            json!({ "email": "ADA@example.com", "password": "analytical" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap().to_string();

    let (status, me) = call(&app, authed("GET", &format!("/api/authors/{}", id), &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["authorName"], "Ada");
    assert_eq!(me["role"], "Guest");
    assert!(me.get("passwordSalt").is_none());

    let (status, _) = call(&app, authed("GET", "/api/authors", &token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, authed("DELETE", &format!("/api/authors/{}", id), &token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(
        &app,
        post_json(
            "/api/authors/login",
            json!({ "email": "ada@example.com", "password": "analytical" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let app = app();

    let request = Request::builder()
        .uri("/api/authors/1")
        .header("Authorization", "Basic YWRhOnB3")
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_AUTH_HEADER");
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let app = app();

    let (status, health) = call(
        &app,
        Request::builder()
            .uri("/health/ready")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, spec) = call(
        &app,
        Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"].get("/api/authors/login").is_some());
}

#[tokio::test]
async fn registration_grants_requested_admin_role() {
    let app = app();

    let (status, registered) = call(
        &app,
        post_json(
            "/api/authors/register",
            json!({
                "authorName": "Mallory",
                "email": "mallory@example.com",
                "password": "letmein",
                "role": "Admin"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registered["role"], "Admin");

    let token = registered["token"].as_str().unwrap().to_string();
    let (status, _) = call(&app, authed("GET", "/api/authors", &token)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, spec) = call(
        &app,
        Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let description = spec["info"]["description"].as_str().unwrap_or_default();
    assert!(description.contains("\"role\": \"Admin\""));
}
