//! Application wiring: builds the shared state from configuration and
//! infrastructure handles.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;

use vaultkeep_auth::password::PasswordHasher;
use vaultkeep_auth::token::{TokenIssuer, TokenVerifier};
use vaultkeep_core::config::AppConfig;
use vaultkeep_database::repositories::{
    AccountRepository, CardRepository, CredentialRepository, NoteRepository,
};
use vaultkeep_service::{AccountService, ObjectService, SecretService};
use vaultkeep_storage::ObjectStore;

use crate::state::AppState;

/// Assemble the full application state: repositories, auth, and services.
pub fn build_state(config: AppConfig, db_pool: PgPool, store: Arc<ObjectStore>) -> AppState {
    let account_repo = Arc::new(AccountRepository::new(db_pool.clone()));
    let credential_repo = Arc::new(CredentialRepository::new(db_pool.clone()));
    let note_repo = Arc::new(NoteRepository::new(db_pool.clone()));
    let card_repo = Arc::new(CardRepository::new(db_pool.clone()));

    let hasher = Arc::new(PasswordHasher::new());
    let issuer = Arc::new(TokenIssuer::new(&config.auth));
    let verifier = Arc::new(TokenVerifier::new(&config.auth));

    let operation_timeout = Duration::from_secs(config.server.operation_timeout_seconds);

    let account_service = Arc::new(AccountService::new(
        account_repo,
        hasher,
        issuer,
        Arc::clone(&store),
        config.auth.password_min_length,
        operation_timeout,
    ));
    let secret_service = Arc::new(SecretService::new(
        credential_repo,
        note_repo,
        card_repo,
        operation_timeout,
    ));
    let object_service = Arc::new(ObjectService::new(Arc::clone(&store), operation_timeout));

    AppState {
        config: Arc::new(config),
        db_pool,
        store,
        token_verifier: verifier,
        account_service,
        secret_service,
        object_service,
    }
}
