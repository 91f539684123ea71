// =========================
// tests/unit/seed_tests.rs
// =========================
//! Seeding customers into the flat-file store
use bankauth_backend::{
    config::Settings,
    seed::{seed_customer, SeedCustomer, SeedError},
    storage::{CustomerStore, FlatFileCustomerStore},
    validation::ValidationError,
    AppState,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
fn seed(email: &str, password: &str, active: bool) -> SeedCustomer {
    let active = if active { "true" } else { "false" };
    let vars = [
        ("SEED_CUSTOMER_EMAIL", email),
        ("SEED_CUSTOMER_PASSWORD", password),
        ("SEED_CUSTOMER_FIRST_NAME", "Ada"),
        ("SEED_CUSTOMER_LAST_NAME", "Lovelace"),
        ("SEED_CUSTOMER_IS_ACTIVE", active),
    ];
    SeedCustomer::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .unwrap()
}

#[tokio::test]
async fn test_seeded_customer_can_log_in() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FlatFileCustomerStore::new(dir.path().join("customers.json")));

    let stored = seed_customer(&store, &seed(" Ada@Example.com ", "Analytical1", true))
        .await
        .unwrap();
    assert_eq!(stored.email, "ada@example.com");
    assert_eq!(stored.display_name, "Ada Lovelace");
    assert!(stored.subject_id.starts_with("cust-"));

    let state = AppState::new(store, Settings::default());
    let result = state
        .login
        .login(&json!({ "email": "ada@example.com", "password": "Analytical1" }))
        .await;
    assert!(result.is_success(), "{result:?}");
}

#[tokio::test]
async fn test_reseeding_updates_in_place() {
    let dir = TempDir::new().unwrap();
    let store = FlatFileCustomerStore::new(dir.path().join("customers.json"));

    let first = seed_customer(&store, &seed("ada@example.com", "Analytical1", true))
        .await
        .unwrap();
    let second = seed_customer(&store, &seed("ada@example.com", "Difference2", false))
        .await
        .unwrap();

    assert_eq!(first.subject_id, second.subject_id);
    assert!(!second.active);
    assert_ne!(first.password_hash, second.password_hash);

    let found = store.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(found, second);
}

#[tokio::test]
async fn test_invalid_seed_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("customers.json");
    let store = FlatFileCustomerStore::new(&path);

    let err = seed_customer(&store, &seed("not-an-email", "Analytical1", true))
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::Invalid(ValidationError::InvalidEmail)));

    let err = seed_customer(&store, &seed("ada@example.com", "short", true))
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::Invalid(ValidationError::InvalidPassword)));

    assert!(!path.exists());
}
