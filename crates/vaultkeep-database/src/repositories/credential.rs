//! Credential secret repository implementation.

use sqlx::PgPool;

use vaultkeep_core::error::{AppError, ErrorKind};
use vaultkeep_core::result::AppResult;
use vaultkeep_entity::secret::CredentialEntry;

/// Repository for stored credential pairs, keyed by account and resource.
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    pool: PgPool,
}

impl CredentialRepository {
    /// Create a new credential repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a credential. A duplicate resource maps to a conflict error.
    pub async fn create(&self, entry: &CredentialEntry) -> AppResult<CredentialEntry> {
        sqlx::query_as::<_, CredentialEntry>(
            "INSERT INTO credentials (account_id, resource, login, password, metadata) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(entry.account_id)
        .bind(&entry.resource)
        .bind(&entry.login)
        .bind(&entry.password)
        .bind(&entry.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!(
                    "Credential for '{}' already exists",
                    entry.resource
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create credential", e),
        })
    }

    /// Fetch one credential by resource name.
    pub async fn find(&self, account_id: i64, resource: &str) -> AppResult<CredentialEntry> {
        sqlx::query_as::<_, CredentialEntry>(
            "SELECT * FROM credentials WHERE account_id = $1 AND resource = $2",
        )
        .bind(account_id)
        .bind(resource)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find credential", e))?
        .ok_or_else(|| AppError::not_found(format!("Credential for '{resource}' not found")))
    }

    /// List the account's credentials, ordered by resource.
    pub async fn list(&self, account_id: i64) -> AppResult<Vec<CredentialEntry>> {
        sqlx::query_as::<_, CredentialEntry>(
            "SELECT * FROM credentials WHERE account_id = $1 ORDER BY resource ASC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list credentials", e))
    }

    /// Replace a credential's stored login, password, and metadata.
    pub async fn update(&self, entry: &CredentialEntry) -> AppResult<CredentialEntry> {
        sqlx::query_as::<_, CredentialEntry>(
            "UPDATE credentials SET login = $3, password = $4, metadata = $5 \
             WHERE account_id = $1 AND resource = $2 RETURNING *",
        )
        .bind(entry.account_id)
        .bind(&entry.resource)
        .bind(&entry.login)
        .bind(&entry.password)
        .bind(&entry.metadata)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update credential", e))?
        .ok_or_else(|| {
            AppError::not_found(format!("Credential for '{}' not found", entry.resource))
        })
    }

    /// Delete one credential by resource name.
    pub async fn delete(&self, account_id: i64, resource: &str) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM credentials WHERE account_id = $1 AND resource = $2")
                .bind(account_id)
                .bind(resource)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete credential", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Credential for '{resource}' not found"
            )));
        }
        Ok(())
    }
}
