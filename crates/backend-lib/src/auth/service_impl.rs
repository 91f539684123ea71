use crate::auth::{hash_password, issue_session_token, verify_password, AuthService, INVALID_CREDENTIALS_MESSAGE};
use crate::error::AppError;
use crate::storage::CustomerStore;
use crate::validation::LoginRequest;
use async_trait::async_trait;
use bankauth_common::{FailureKind, LoginResult};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};
use zeroize::Zeroizing;

// Verified against when no usable credential exists, so unknown and
// inactive accounts cost the same derivation as a wrong password.
static DECOY_HASH: LazyLock<String> = LazyLock::new(|| hash_password("decoy-password-never-matches"));

/// Credential verification backed by an injected customer store
pub struct DefaultAuth {
    store: Arc<dyn CustomerStore>,
}

impl DefaultAuth {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }
}

fn invalid_credentials() -> LoginResult {
    LoginResult::failure(FailureKind::InvalidCredentials, INVALID_CREDENTIALS_MESSAGE)
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResult, AppError> {
        let credential = self
            .store
            .find_by_email(request.email())
            .await?
            .filter(|c| c.active);

        let stored_hash = credential.as_ref().map(|c| c.password_hash.clone());
        let password = Zeroizing::new(request.password().to_owned());
        let matches = tokio::task::spawn_blocking(move || {
            let stored = stored_hash.as_deref().unwrap_or(DECOY_HASH.as_str());
            verify_password(&password, stored)
        })
        .await?;

        let Some(credential) = credential.filter(|_| matches) else {
            debug!(email = %request.email(), "credentials rejected");
            return Ok(invalid_credentials());
        };

        self.store
            .record_successful_login(&credential.subject_id)
            .await?;

        info!(subject_id = %credential.subject_id, "customer authenticated");
        Ok(LoginResult::Success {
            token: issue_session_token(&credential.subject_id),
            subject_id: credential.subject_id,
            display_name: credential.display_name,
        })
    }
}
