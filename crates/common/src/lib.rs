// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! exchanged between the bank login API and its clients.
//! This module defines the login result protocol and supporting types.

use serde::{Deserialize, Serialize};

/// Opaque identifier of an authenticated customer
pub type SubjectId = String;

/// Outcome of a single login attempt, as seen by the transport layer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoginResult {
    /// The customer was authenticated
    /// # Fields
    /// * `token` - Opaque session token identifying the subject
    /// * `subject_id` - Identifier of the authenticated customer
    /// * `display_name` - Human readable name of the customer
    #[serde(rename_all = "camelCase")]
    Success {
        token: String,
        subject_id: SubjectId,
        display_name: String,
    },
    /// The attempt was rejected
    /// # Fields
    /// * `kind` - Category of the failure
    /// * `message` - User-visible explanation, never containing internals
    Failure { kind: FailureKind, message: String },
}

impl LoginResult {
    /// Build a failure outcome
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure kind, if any
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Transport-neutral failure categories
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input did not have the shape of a login request
    MalformedRequest,
    /// Unknown account, inactive account or wrong password
    InvalidCredentials,
    /// Something below the login pipeline failed
    InternalError,
}

impl FailureKind {
    /// Stable label used in logs and metrics
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRequest => "malformed_request",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InternalError => "internal_error",
        }
    }
}
