// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Login request validation module.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use zeroize::Zeroize;

// Common validation constants
pub const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body must be an object.")]
    NotAnObject,

    #[error("Email is required.")]
    MissingEmail,

    #[error("Email must be a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least 8 characters long.")]
    InvalidPassword,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A syntactically valid login request.
///
/// The email is trimmed and lowercased; the password is kept verbatim and
/// wiped from memory when the request is dropped.
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Drop for LoginRequest {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Validate an email address and return its normalized form
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(email.to_lowercase())
}

/// Validate a password. Casing and whitespace are significant, so nothing is trimmed.
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword);
    }
    Ok(password)
}

/// Validate an untyped login payload
pub fn validate_login_request(raw: &Value) -> ValidationResult<LoginRequest> {
    let Value::Object(fields) = raw else {
        return Err(ValidationError::NotAnObject);
    };

    let email = match fields.get("email") {
        Some(Value::String(email)) => validate_email(email)?,
        _ => return Err(ValidationError::MissingEmail),
    };

    let password = match fields.get("password") {
        Some(Value::String(password)) => validate_password(password)?,
        _ => return Err(ValidationError::InvalidPassword),
    };

    Ok(LoginRequest {
        email,
        password: password.to_owned(),
    })
}
