// =========================
// tests/integration/http_tests.rs
// =========================
//! HTTP surface: status mapping, body shapes, health and CORS.
use crate::test_utils::{setup_state, FailOn, JANE_EMAIL, JANE_ID, JANE_PASSWORD};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use bankauth_backend::router::create_router;
use serde_json::Value;
use tower::ServiceExt;

fn app(fail_on: FailOn) -> Router {
    let (state, _) = setup_state(fail_on);
    create_router(state)
}

fn login_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_login_success_is_200() {
    let body = serde_json::json!({ "email": JANE_EMAIL, "password": JANE_PASSWORD }).to_string();

    let response = app(FailOn::Nothing).oneshot(login_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["subjectId"], JANE_ID);
    assert_eq!(json["displayName"], "Jane Doe");
    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_invalid_json_is_400() {
    let response = app(FailOn::Nothing)
        .oneshot(login_request("{\"email\":"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["status"], "failure");
    assert_eq!(json["kind"], "malformed_request");
    assert_eq!(json["message"], "Request body must be valid JSON.");
}

#[tokio::test]
async fn test_short_password_is_400() {
    let body = r#"{"email":"x@y.com","password":"short"}"#;

    let response = app(FailOn::Nothing).oneshot(login_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Password must be at least 8 characters long.");
}

#[tokio::test]
async fn test_unknown_customer_is_401() {
    let body = r#"{"email":"ghost@nowhere.com","password":"whatever1"}"#;

    let response = app(FailOn::Nothing).oneshot(login_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["kind"], "invalid_credentials");
    assert_eq!(json["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_store_outage_is_500_without_details() {
    let body = serde_json::json!({ "email": JANE_EMAIL, "password": JANE_PASSWORD }).to_string();

    let response = app(FailOn::Lookup).oneshot(login_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["kind"], "internal_error");
    assert!(!json.to_string().contains("10.0.0.5"));
}

#[tokio::test]
async fn test_health() {
    let request = || Request::builder().uri("/api/health").body(Body::empty()).unwrap();

    let response = app(FailOn::Nothing).oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");

    let response = app(FailOn::Lookup).oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "STORE_001");
    assert!(!json.to_string().contains("10.0.0.5"));
}

#[tokio::test]
async fn test_legacy_health_redirects() {
    let response = app(FailOn::Nothing)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/api/health");
}

#[tokio::test]
async fn test_cors_preflight() {
    let response = app(FailOn::Nothing)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/login")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
