//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use vaultkeep_auth::token::TokenVerifier;
use vaultkeep_core::config::AppConfig;
use vaultkeep_service::{AccountService, ObjectService, SecretService};
use vaultkeep_storage::ObjectStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Quota-tracked object store.
    pub store: Arc<ObjectStore>,
    /// Session token verifier.
    pub token_verifier: Arc<TokenVerifier>,
    /// Account lifecycle service.
    pub account_service: Arc<AccountService>,
    /// Structured secret service.
    pub secret_service: Arc<SecretService>,
    /// Binary object service.
    pub object_service: Arc<ObjectService>,
}
