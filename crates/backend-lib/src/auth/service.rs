use crate::error::AppError;
use crate::validation::LoginRequest;
use async_trait::async_trait;
use bankauth_common::LoginResult;

/// Message shared by every credential failure, whatever its cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Decide one login attempt.
    ///
    /// `Ok` carries either a success or an invalid-credentials failure;
    /// `Err` means a collaborator failed and no decision was reached.
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResult, AppError>;
}
