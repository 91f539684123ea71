// ============================
// bankauth-backend/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token_generator;
mod service;
mod service_impl;

pub use password::{hash_password, verify_password, PasswordHashRecord, DERIVED_KEY_LENGTH, PBKDF2_ROUNDS, SALT_LENGTH};
pub use service::{AuthService, INVALID_CREDENTIALS_MESSAGE};
pub use service_impl::DefaultAuth;
pub use token_generator::issue_session_token;
