// ============================
// bankauth-backend/src/lib.rs
// ============================
//! Core backend functionality for the bank customer login service.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod seed;
pub mod storage;
pub mod validation;

use crate::auth::DefaultAuth;
use crate::config::Settings;
use crate::handlers::LoginController;
use crate::storage::CustomerStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Login orchestrator
    pub login: LoginController,
    /// Customer store backend
    pub store: Arc<dyn CustomerStore>,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state around a customer store
    pub fn new(store: Arc<dyn CustomerStore>, settings: Settings) -> Self {
        let auth = Arc::new(DefaultAuth::new(store.clone()));
        Self {
            login: LoginController::new(auth),
            store,
            settings: Arc::new(settings),
        }
    }
}
