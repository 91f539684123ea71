// ============================
// bankauth-backend/src/seed.rs
// ============================
//! Customer seeding and demo data.
use crate::auth::hash_password;
use crate::storage::{Credential, FlatFileCustomerStore, StoreError};
use crate::validation::{validate_email, validate_password, ValidationError};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

pub const SEED_EMAIL_VAR: &str = "SEED_CUSTOMER_EMAIL";
pub const SEED_PASSWORD_VAR: &str = "SEED_CUSTOMER_PASSWORD";
pub const SEED_FIRST_NAME_VAR: &str = "SEED_CUSTOMER_FIRST_NAME";
pub const SEED_LAST_NAME_VAR: &str = "SEED_CUSTOMER_LAST_NAME";
pub const SEED_IS_ACTIVE_VAR: &str = "SEED_CUSTOMER_IS_ACTIVE";

const REQUIRED_VARS: [&str; 4] = [
    SEED_EMAIL_VAR,
    SEED_PASSWORD_VAR,
    SEED_FIRST_NAME_VAR,
    SEED_LAST_NAME_VAR,
];

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Missing required seed environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    #[error("Invalid seed customer: {0}")]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A customer to seed, as read from the environment
pub struct SeedCustomer {
    pub email: String,
    pub password: Zeroizing<String>,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
}

impl SeedCustomer {
    /// Read a seed customer from `SEED_CUSTOMER_*` environment variables
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read a seed customer through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .into_iter()
            .filter(|key| present(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(SeedError::MissingVariables(missing));
        }

        let required = |key: &'static str| present(key).ok_or(SeedError::MissingVariables(vec![key]));

        Ok(Self {
            email: required(SEED_EMAIL_VAR)?,
            password: Zeroizing::new(required(SEED_PASSWORD_VAR)?),
            first_name: required(SEED_FIRST_NAME_VAR)?.trim().to_string(),
            last_name: required(SEED_LAST_NAME_VAR)?.trim().to_string(),
            active: present(SEED_IS_ACTIVE_VAR)
                .map_or(true, |v| !v.trim().eq_ignore_ascii_case("false")),
        })
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Debug for SeedCustomer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedCustomer")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("active", &self.active)
            .finish()
    }
}

/// Validate, hash and upsert a seed customer into the flat-file store
pub async fn seed_customer(
    store: &FlatFileCustomerStore,
    seed: &SeedCustomer,
) -> Result<Credential, SeedError> {
    let email = validate_email(&seed.email)?;
    let password = validate_password(&seed.password)?;

    let credential = Credential {
        subject_id: format!("cust-{}", Uuid::new_v4().simple()),
        email,
        display_name: seed.display_name(),
        password_hash: hash_password(password),
        active: seed.active,
        last_login_at: None,
    };

    Ok(store.upsert(credential).await?)
}

/// Two well-known customers for local demos, hashed at call time
pub fn demo_customers() -> Vec<Credential> {
    [
        ("cust-1001", "jane.doe@example.com", "Jane Doe", "Sup3rSecret!"),
        ("cust-1002", "john.smith@example.com", "John Smith", "BankingR0cks"),
    ]
    .into_iter()
    .map(|(subject_id, email, display_name, password)| Credential {
        subject_id: subject_id.to_string(),
        email: email.to_string(),
        display_name: display_name.to_string(),
        password_hash: hash_password(password),
        active: true,
        last_login_at: None,
    })
    .collect()
}
