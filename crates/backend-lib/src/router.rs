// ============================
// bankauth-backend/src/router.rs
// ============================
//! HTTP router: maps transport-neutral login outcomes onto status codes.
use crate::error::AppError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use bankauth_common::{FailureKind, LoginResult};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the HTTP router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/health", get(health_handler))
        .route("/health", get(|| async { Redirect::permanent("/api/health") }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Protocol status for a login outcome
pub fn status_for(outcome: &LoginResult) -> StatusCode {
    match outcome.failure_kind() {
        None => StatusCode::OK,
        Some(FailureKind::MalformedRequest) => StatusCode::BAD_REQUEST,
        Some(FailureKind::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        Some(FailureKind::InternalError) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handler for `POST /api/login`
pub async fn login_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let outcome = state.login.login_body(&body).await;
    (status_for(&outcome), Json(outcome)).into_response()
}

/// Handler for `GET /api/health`
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    state.store.health_check().await?;
    Ok(Json(serde_json::json!({ "status": "ok" })).into_response())
}
