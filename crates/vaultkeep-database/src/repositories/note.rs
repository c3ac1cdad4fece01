//! Text note repository implementation.

use sqlx::PgPool;

use vaultkeep_core::error::{AppError, ErrorKind};
use vaultkeep_core::result::AppResult;
use vaultkeep_entity::secret::NoteEntry;

/// Repository for stored text notes, keyed by account and label.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Create a new note repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a note. A duplicate label maps to a conflict error.
    pub async fn create(&self, entry: &NoteEntry) -> AppResult<NoteEntry> {
        sqlx::query_as::<_, NoteEntry>(
            "INSERT INTO notes (account_id, label, body, metadata) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(entry.account_id)
        .bind(&entry.label)
        .bind(&entry.body)
        .bind(&entry.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Note '{}' already exists", entry.label))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create note", e),
        })
    }

    /// Fetch one note by label.
    pub async fn find(&self, account_id: i64, label: &str) -> AppResult<NoteEntry> {
        sqlx::query_as::<_, NoteEntry>(
            "SELECT * FROM notes WHERE account_id = $1 AND label = $2",
        )
        .bind(account_id)
        .bind(label)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find note", e))?
        .ok_or_else(|| AppError::not_found(format!("Note '{label}' not found")))
    }

    /// List the account's notes, ordered by label.
    pub async fn list(&self, account_id: i64) -> AppResult<Vec<NoteEntry>> {
        sqlx::query_as::<_, NoteEntry>(
            "SELECT * FROM notes WHERE account_id = $1 ORDER BY label ASC",
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notes", e))
    }

    /// Replace a note's body and metadata.
    pub async fn update(&self, entry: &NoteEntry) -> AppResult<NoteEntry> {
        sqlx::query_as::<_, NoteEntry>(
            "UPDATE notes SET body = $3, metadata = $4 \
             WHERE account_id = $1 AND label = $2 RETURNING *",
        )
        .bind(entry.account_id)
        .bind(&entry.label)
        .bind(&entry.body)
        .bind(&entry.metadata)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update note", e))?
        .ok_or_else(|| AppError::not_found(format!("Note '{}' not found", entry.label)))
    }

    /// Delete one note by label.
    pub async fn delete(&self, account_id: i64, label: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE account_id = $1 AND label = $2")
            .bind(account_id)
            .bind(label)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete note", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Note '{label}' not found")));
        }
        Ok(())
    }
}
