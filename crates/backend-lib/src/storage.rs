// ============================
// bankauth-backend/src/storage.rs
// ============================
//! Customer store abstraction with in-memory and flat-file implementations.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::{fs as tokio_fs, sync::Mutex};

/// Stored identity record of a customer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub subject_id: String,
    /// Always stored lowercased
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Failures of the customer store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt customer data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Unknown subject: {0}")]
    UnknownSubject(String),
}

/// Trait for customer store backends
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Find a credential by email, case-insensitively
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;

    /// Record the instant of a successful login for a subject
    async fn record_successful_login(&self, subject_id: &str) -> Result<(), StoreError>;

    /// Check the store is reachable
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Customer store held entirely in memory
#[derive(Default)]
pub struct InMemoryCustomerStore {
    customers: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCustomerStore {
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        let store = Self::default();
        for credential in credentials {
            store.insert(credential);
        }
        store
    }

    /// Insert or replace a credential, keyed by its lowercased email
    pub fn insert(&self, mut credential: Credential) {
        credential.email = credential.email.trim().to_lowercase();
        self.customers
            .write()
            .insert(credential.email.clone(), credential);
    }

    /// Snapshot of a credential, mostly for inspection in tests
    pub fn get(&self, email: &str) -> Option<Credential> {
        self.customers.read().get(&email.to_lowercase()).cloned()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.get(email))
    }

    async fn record_successful_login(&self, subject_id: &str) -> Result<(), StoreError> {
        let mut customers = self.customers.write();
        let credential = customers
            .values_mut()
            .find(|c| c.subject_id == subject_id)
            .ok_or_else(|| StoreError::UnknownSubject(subject_id.to_string()))?;
        credential.last_login_at = Some(Utc::now());
        Ok(())
    }
}

/// Flat-file customer store: a single JSON array of credentials
pub struct FlatFileCustomerStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FlatFileCustomerStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Credential>, StoreError> {
        if !tokio_fs::try_exists(&self.path).await? {
            return Ok(Vec::new());
        }
        let content = tokio_fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn save(&self, credentials: &[Credential]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(credentials)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Insert a credential, or update the one with the same email.
    ///
    /// An existing record keeps its subject id. Returns the stored record.
    pub async fn upsert(&self, mut credential: Credential) -> Result<Credential, StoreError> {
        let _guard = self.write_lock.lock().await;
        credential.email = credential.email.trim().to_lowercase();

        let mut credentials = self.load().await?;
        let stored = match credentials.iter().position(|c| c.email == credential.email) {
            Some(index) => {
                let existing = &mut credentials[index];
                existing.display_name = credential.display_name;
                existing.password_hash = credential.password_hash;
                existing.active = credential.active;
                existing.clone()
            },
            None => {
                credentials.push(credential.clone());
                credential
            },
        };

        self.save(&credentials).await?;
        Ok(stored)
    }
}

#[async_trait]
impl CustomerStore for FlatFileCustomerStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        let email = email.to_lowercase();
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|c| c.email.to_lowercase() == email))
    }

    async fn record_successful_login(&self, subject_id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut credentials = self.load().await?;
        let credential = credentials
            .iter_mut()
            .find(|c| c.subject_id == subject_id)
            .ok_or_else(|| StoreError::UnknownSubject(subject_id.to_string()))?;
        credential.last_login_at = Some(Utc::now());
        self.save(&credentials).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.load().await.map(|_| ())
    }
}
