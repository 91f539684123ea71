// ============================
// crates/backend-lib/src/handlers/login.rs
// ============================
//! Login orchestration.
//!
//! Turns an untyped payload into exactly one [`LoginResult`]: a success, a
//! malformed request, invalid credentials, or an internal error. Nothing
//! below this point escapes unmapped.
use crate::auth::AuthService;
use crate::error::AppError;
use crate::metrics::{LOGIN_ATTEMPT, LOGIN_DURATION_MS, LOGIN_FAILURE, LOGIN_SUCCESS};
use crate::validation::validate_login_request;
use bankauth_common::{FailureKind, LoginResult};
use metrics::{counter, histogram};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// User-visible message for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Adapts raw transport input to the credential verification service
#[derive(Clone)]
pub struct LoginController {
    auth: Arc<dyn AuthService>,
}

impl LoginController {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }

    /// Run one login attempt over an untyped payload
    pub async fn login(&self, raw: &Value) -> LoginResult {
        let start = Instant::now();
        counter!(LOGIN_ATTEMPT).increment(1);

        let outcome = match validate_login_request(raw) {
            Ok(request) => match self.auth.authenticate(&request).await {
                Ok(result) => result,
                Err(err) => Self::reject(&err),
            },
            Err(err) => Self::reject(&AppError::from(err)),
        };

        Self::record(&outcome, start);
        outcome
    }

    /// Run one login attempt over a raw request body.
    ///
    /// An empty body is treated as JSON `null`; anything unparsable is a
    /// malformed request.
    pub async fn login_body(&self, body: &[u8]) -> LoginResult {
        let raw = if body.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice(body)
        };

        match raw {
            Ok(raw) => self.login(&raw).await,
            Err(err) => {
                let start = Instant::now();
                counter!(LOGIN_ATTEMPT).increment(1);
                let outcome = Self::reject(&AppError::Json(err));
                Self::record(&outcome, start);
                outcome
            },
        }
    }

    /// Map an error into the failure category the transport layer sees
    fn reject(err: &AppError) -> LoginResult {
        match err {
            AppError::Validation(_) | AppError::Json(_) => {
                info!(reason = %err.sanitized_message(), "malformed login request");
                LoginResult::failure(FailureKind::MalformedRequest, err.sanitized_message())
            },
            AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                error!(error = %err, "login failed internally");
                LoginResult::failure(FailureKind::InternalError, INTERNAL_ERROR_MESSAGE)
            },
        }
    }

    fn record(outcome: &LoginResult, start: Instant) {
        histogram!(LOGIN_DURATION_MS).record(start.elapsed().as_secs_f64() * 1000.0);
        match outcome.failure_kind() {
            None => counter!(LOGIN_SUCCESS).increment(1),
            Some(kind) => counter!(LOGIN_FAILURE, "kind" => kind.as_str()).increment(1),
        }
    }
}
