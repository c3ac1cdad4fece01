//! Account registration, login, and tier changes.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use vaultkeep_auth::password::{INVALID_CREDENTIALS, PasswordHasher};
use vaultkeep_auth::token::TokenIssuer;
use vaultkeep_core::error::AppError;
use vaultkeep_core::result::AppResult;
use vaultkeep_database::repositories::AccountRepository;
use vaultkeep_entity::account::Account;
use vaultkeep_entity::tier::SubscriptionTier;
use vaultkeep_storage::ObjectStore;

use crate::context::{RequestContext, with_timeout};

/// Handles account lifecycle: registration, login, and tier changes.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// Account repository.
    account_repo: Arc<AccountRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session token issuer.
    issuer: Arc<TokenIssuer>,
    /// Object store, kept in sync with tier changes.
    store: Arc<ObjectStore>,
    /// Minimum accepted password length.
    password_min_length: usize,
    /// Deadline applied to each repository operation.
    operation_timeout: Duration,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        account_repo: Arc<AccountRepository>,
        hasher: Arc<PasswordHasher>,
        issuer: Arc<TokenIssuer>,
        store: Arc<ObjectStore>,
        password_min_length: usize,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            account_repo,
            hasher,
            issuer,
            store,
            password_min_length,
            operation_timeout,
        }
    }

    /// Register a new account and immediately issue a session token.
    pub async fn register(
        &self,
        login: &str,
        password: &str,
        tier: SubscriptionTier,
    ) -> AppResult<String> {
        if login.trim().is_empty() {
            return Err(AppError::validation("Login cannot be empty"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let (hash, salt) = self.hasher.hash_password(password)?;
        let account = with_timeout(
            self.operation_timeout,
            "account create",
            self.account_repo.create(login, &hash, &salt, tier),
        )
        .await?;
        self.store.update_tier(account.id, account.tier).await;

        info!(account_id = account.id, login, "Account registered");
        self.issuer.issue(account.id)
    }

    /// Authenticate a login/password pair and issue a session token.
    ///
    /// An unknown login and a wrong password produce the same message so
    /// the response does not reveal which logins exist.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<String> {
        let account = with_timeout(
            self.operation_timeout,
            "account lookup",
            self.account_repo.find_by_login(login),
        )
        .await?
        .ok_or_else(|| AppError::authentication(INVALID_CREDENTIALS))?;

        self.hasher
            .verify_password(password, &account.salt, &account.password_hash)?;

        info!(account_id = account.id, "Account logged in");
        self.issuer.issue(account.id)
    }

    /// Fetch the calling account's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<Account> {
        with_timeout(
            self.operation_timeout,
            "account lookup",
            self.account_repo.find_by_id(ctx.account_id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Change the calling account's subscription tier.
    ///
    /// Already-stored objects are kept even when the new ceiling is lower;
    /// the tightened limit applies to subsequent saves only.
    pub async fn change_tier(
        &self,
        ctx: &RequestContext,
        tier: SubscriptionTier,
    ) -> AppResult<Account> {
        let account = with_timeout(
            self.operation_timeout,
            "tier update",
            self.account_repo.update_tier(ctx.account_id, tier),
        )
        .await?;
        self.store.update_tier(account.id, account.tier).await;

        info!(account_id = account.id, %tier, "Subscription tier changed");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultkeep_core::config::{AuthConfig, DatabaseConfig, StorageConfig};
    use vaultkeep_core::error::ErrorKind;
    use vaultkeep_database::DatabasePool;

    async fn service_with(
        dir: &tempfile::TempDir,
        db_config: &DatabaseConfig,
        operation_timeout: Duration,
    ) -> AccountService {
        let pool = DatabasePool::connect_lazy(db_config).unwrap();
        let auth = AuthConfig::default();
        let storage = StorageConfig {
            root_path: dir.path().to_string_lossy().to_string(),
            ..StorageConfig::default()
        };
        let store = Arc::new(ObjectStore::open(&storage).await.unwrap());
        AccountService::new(
            Arc::new(AccountRepository::new(pool.pool().clone())),
            Arc::new(PasswordHasher::new()),
            Arc::new(TokenIssuer::new(&auth)),
            store,
            auth.password_min_length,
            operation_timeout,
        )
    }

    async fn service(dir: &tempfile::TempDir) -> AccountService {
        service_with(dir, &DatabaseConfig::default(), Duration::from_secs(5)).await
    }

    #[tokio::test]
    async fn register_rejects_short_passwords_before_touching_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir).await;

        let err = svc
            .register("alice", "short", SubscriptionTier::Regular)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn stuck_database_surfaces_a_timeout() {
        // A listener that accepts connections but never speaks the
        // Postgres protocol, so any query through it stalls.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let db_config = DatabaseConfig {
            url: format!("postgres://vault@{addr}/vaultkeep"),
            connect_timeout_seconds: 60,
            ..DatabaseConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let svc = service_with(&dir, &db_config, Duration::from_millis(50)).await;

        let err = svc.login("alice", "long enough password").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn register_rejects_blank_logins() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir).await;

        let err = svc
            .register("   ", "long enough password", SubscriptionTier::Regular)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
