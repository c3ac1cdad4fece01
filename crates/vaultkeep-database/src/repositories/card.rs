//! Payment card repository implementation.

use sqlx::PgPool;

use vaultkeep_core::error::{AppError, ErrorKind};
use vaultkeep_core::result::AppResult;
use vaultkeep_entity::secret::CardEntry;

/// Repository for stored payment cards, keyed by account and card number.
#[derive(Debug, Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    /// Create a new card repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a card. A duplicate number maps to a conflict error.
    pub async fn create(&self, entry: &CardEntry) -> AppResult<CardEntry> {
        sqlx::query_as::<_, CardEntry>(
            "INSERT INTO cards (account_id, number, cardholder, expires_at, cvv, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(entry.account_id)
        .bind(&entry.number)
        .bind(&entry.cardholder)
        .bind(&entry.expires_at)
        .bind(&entry.cvv)
        .bind(&entry.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Card already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create card", e),
        })
    }

    /// Fetch one card by number.
    pub async fn find(&self, account_id: i64, number: &str) -> AppResult<CardEntry> {
        sqlx::query_as::<_, CardEntry>(
            "SELECT * FROM cards WHERE account_id = $1 AND number = $2",
        )
        .bind(account_id)
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find card", e))?
        .ok_or_else(|| AppError::not_found("Card not found"))
    }

    /// List the account's cards, ordered by number.
    pub async fn list(&self, account_id: i64) -> AppResult<Vec<CardEntry>> {
        sqlx::query_as::<_, CardEntry>(
            "SELECT * FROM cards WHERE account_id = $1 ORDER BY number ASC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list cards", e))
    }

    /// Replace a card's holder, expiry, cvv, and metadata.
    pub async fn update(&self, entry: &CardEntry) -> AppResult<CardEntry> {
        sqlx::query_as::<_, CardEntry>(
            "UPDATE cards SET cardholder = $3, expires_at = $4, cvv = $5, metadata = $6 \
             WHERE account_id = $1 AND number = $2 RETURNING *",
        )
        .bind(entry.account_id)
        .bind(&entry.number)
        .bind(&entry.cardholder)
        .bind(&entry.expires_at)
        .bind(&entry.cvv)
        .bind(&entry.metadata)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update card", e))?
        .ok_or_else(|| AppError::not_found("Card not found"))
    }

    /// Delete one card by number.
    pub async fn delete(&self, account_id: i64, number: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cards WHERE account_id = $1 AND number = $2")
            .bind(account_id)
            .bind(number)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete card", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Card not found"));
        }
        Ok(())
    }
}
