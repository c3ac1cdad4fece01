//! Account repository implementation.

use sqlx::PgPool;

use vaultkeep_core::error::{AppError, ErrorKind};
use vaultkeep_core::result::AppResult;
use vaultkeep_entity::account::Account;
use vaultkeep_entity::tier::SubscriptionTier;

/// Repository for account CRUD and tier queries.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account. A duplicate login maps to a conflict error.
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        salt: &str,
        tier: SubscriptionTier,
    ) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (login, password_hash, salt, tier) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(login)
        .bind(password_hash)
        .bind(salt)
        .bind(tier)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Login '{login}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create account", e),
        })
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    /// Find an account by login.
    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by login", e)
            })
    }

    /// Update an account's subscription tier.
    pub async fn update_tier(&self, id: i64, tier: SubscriptionTier) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET tier = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(tier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tier", e))?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    /// List every account's tier, for seeding the object store at startup.
    pub async fn account_tiers(&self) -> AppResult<Vec<(i64, SubscriptionTier)>> {
        sqlx::query_as::<_, (i64, SubscriptionTier)>("SELECT id, tier FROM accounts")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list account tiers", e)
            })
    }
}
