//! Structured secret records: credentials, notes, and payment cards.
//!
//! Plain rows keyed by account id, persisted with parameterized CRUD.

use serde::{Deserialize, Serialize};

/// A stored credential pair for some external resource.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CredentialEntry {
    /// Owning account.
    pub account_id: i64,
    /// Resource the credentials belong to (site, host, service).
    pub resource: String,
    /// Login at the resource.
    pub login: String,
    /// Password at the resource.
    pub password: String,
    /// Free-form metadata.
    pub metadata: String,
}

/// A stored text note.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NoteEntry {
    /// Owning account.
    pub account_id: i64,
    /// Unique label within the account.
    pub label: String,
    /// Note body.
    pub body: String,
    /// Free-form metadata.
    pub metadata: String,
}

/// A stored payment card record.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CardEntry {
    /// Owning account.
    pub account_id: i64,
    /// Card number, unique within the account.
    pub number: String,
    /// Cardholder name as printed.
    pub cardholder: String,
    /// Expiration in MM/YY form.
    pub expires_at: String,
    /// Card verification value.
    pub cvv: String,
    /// Free-form metadata.
    pub metadata: String,
}
