//! Structured secret operations over the three relational record kinds.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use vaultkeep_core::error::AppError;
use vaultkeep_core::result::AppResult;
use vaultkeep_database::repositories::{CardRepository, CredentialRepository, NoteRepository};
use vaultkeep_entity::secret::{CardEntry, CredentialEntry, NoteEntry};

use crate::context::{RequestContext, with_timeout};

/// CRUD over credentials, notes, and cards for the calling account.
///
/// Ownership is enforced structurally: every repository call is keyed by
/// the context's account id, so one account can never address another's
/// rows.
#[derive(Debug, Clone)]
pub struct SecretService {
    credential_repo: Arc<CredentialRepository>,
    note_repo: Arc<NoteRepository>,
    card_repo: Arc<CardRepository>,
    /// Deadline applied to each repository operation.
    operation_timeout: Duration,
}

impl SecretService {
    /// Creates a new secret service.
    pub fn new(
        credential_repo: Arc<CredentialRepository>,
        note_repo: Arc<NoteRepository>,
        card_repo: Arc<CardRepository>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            credential_repo,
            note_repo,
            card_repo,
            operation_timeout,
        }
    }

    /// Store a credential pair for an external resource.
    pub async fn create_credential(
        &self,
        ctx: &RequestContext,
        mut entry: CredentialEntry,
    ) -> AppResult<CredentialEntry> {
        if entry.resource.trim().is_empty() {
            return Err(AppError::validation("Resource cannot be empty"));
        }
        entry.account_id = ctx.account_id;
        let created = with_timeout(
            self.operation_timeout,
            "credential create",
            self.credential_repo.create(&entry),
        )
        .await?;

        info!(account_id = ctx.account_id, resource = %created.resource, "Credential stored");
        Ok(created)
    }

    /// Fetch one credential by resource name.
    pub async fn get_credential(
        &self,
        ctx: &RequestContext,
        resource: &str,
    ) -> AppResult<CredentialEntry> {
        with_timeout(
            self.operation_timeout,
            "credential lookup",
            self.credential_repo.find(ctx.account_id, resource),
        )
        .await
    }

    /// List the calling account's credentials.
    pub async fn list_credentials(&self, ctx: &RequestContext) -> AppResult<Vec<CredentialEntry>> {
        with_timeout(
            self.operation_timeout,
            "credential list",
            self.credential_repo.list(ctx.account_id),
        )
        .await
    }

    /// Replace a credential's stored values.
    pub async fn update_credential(
        &self,
        ctx: &RequestContext,
        mut entry: CredentialEntry,
    ) -> AppResult<CredentialEntry> {
        entry.account_id = ctx.account_id;
        with_timeout(
            self.operation_timeout,
            "credential update",
            self.credential_repo.update(&entry),
        )
        .await
    }

    /// Delete one credential by resource name.
    pub async fn delete_credential(&self, ctx: &RequestContext, resource: &str) -> AppResult<()> {
        with_timeout(
            self.operation_timeout,
            "credential delete",
            self.credential_repo.delete(ctx.account_id, resource),
        )
        .await?;
        info!(account_id = ctx.account_id, resource, "Credential deleted");
        Ok(())
    }

    /// Store a text note.
    pub async fn create_note(
        &self,
        ctx: &RequestContext,
        mut entry: NoteEntry,
    ) -> AppResult<NoteEntry> {
        if entry.label.trim().is_empty() {
            return Err(AppError::validation("Label cannot be empty"));
        }
        entry.account_id = ctx.account_id;
        let created = with_timeout(
            self.operation_timeout,
            "note create",
            self.note_repo.create(&entry),
        )
        .await?;

        info!(account_id = ctx.account_id, label = %created.label, "Note stored");
        Ok(created)
    }

    /// Fetch one note by label.
    pub async fn get_note(&self, ctx: &RequestContext, label: &str) -> AppResult<NoteEntry> {
        with_timeout(
            self.operation_timeout,
            "note lookup",
            self.note_repo.find(ctx.account_id, label),
        )
        .await
    }

    /// List the calling account's notes.
    pub async fn list_notes(&self, ctx: &RequestContext) -> AppResult<Vec<NoteEntry>> {
        with_timeout(
            self.operation_timeout,
            "note list",
            self.note_repo.list(ctx.account_id),
        )
        .await
    }

    /// Replace a note's body and metadata.
    pub async fn update_note(
        &self,
        ctx: &RequestContext,
        mut entry: NoteEntry,
    ) -> AppResult<NoteEntry> {
        entry.account_id = ctx.account_id;
        with_timeout(
            self.operation_timeout,
            "note update",
            self.note_repo.update(&entry),
        )
        .await
    }

    /// Delete one note by label.
    pub async fn delete_note(&self, ctx: &RequestContext, label: &str) -> AppResult<()> {
        with_timeout(
            self.operation_timeout,
            "note delete",
            self.note_repo.delete(ctx.account_id, label),
        )
        .await?;
        info!(account_id = ctx.account_id, label, "Note deleted");
        Ok(())
    }

    /// Store a payment card.
    pub async fn create_card(
        &self,
        ctx: &RequestContext,
        mut entry: CardEntry,
    ) -> AppResult<CardEntry> {
        if entry.number.trim().is_empty() {
            return Err(AppError::validation("Card number cannot be empty"));
        }
        entry.account_id = ctx.account_id;
        let created = with_timeout(
            self.operation_timeout,
            "card create",
            self.card_repo.create(&entry),
        )
        .await?;

        info!(account_id = ctx.account_id, "Card stored");
        Ok(created)
    }

    /// Fetch one card by number.
    pub async fn get_card(&self, ctx: &RequestContext, number: &str) -> AppResult<CardEntry> {
        with_timeout(
            self.operation_timeout,
            "card lookup",
            self.card_repo.find(ctx.account_id, number),
        )
        .await
    }

    /// List the calling account's cards.
    pub async fn list_cards(&self, ctx: &RequestContext) -> AppResult<Vec<CardEntry>> {
        with_timeout(
            self.operation_timeout,
            "card list",
            self.card_repo.list(ctx.account_id),
        )
        .await
    }

    /// Replace a card's stored values.
    pub async fn update_card(
        &self,
        ctx: &RequestContext,
        mut entry: CardEntry,
    ) -> AppResult<CardEntry> {
        entry.account_id = ctx.account_id;
        with_timeout(
            self.operation_timeout,
            "card update",
            self.card_repo.update(&entry),
        )
        .await
    }

    /// Delete one card by number.
    pub async fn delete_card(&self, ctx: &RequestContext, number: &str) -> AppResult<()> {
        with_timeout(
            self.operation_timeout,
            "card delete",
            self.card_repo.delete(ctx.account_id, number),
        )
        .await?;
        info!(account_id = ctx.account_id, "Card deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultkeep_core::config::DatabaseConfig;
    use vaultkeep_core::error::ErrorKind;
    use vaultkeep_database::DatabasePool;

    #[tokio::test]
    async fn stuck_repository_surfaces_a_timeout() {
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
        let pool = DatabasePool::connect_lazy(&db_config).unwrap();
        let svc = SecretService::new(
            Arc::new(CredentialRepository::new(pool.pool().clone())),
            Arc::new(NoteRepository::new(pool.pool().clone())),
            Arc::new(CardRepository::new(pool.pool().clone())),
            Duration::from_millis(50),
        );

        let ctx = RequestContext::new(1, "test-correlation".to_string());
        let err = svc.list_credentials(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Timeout);
    }
}
