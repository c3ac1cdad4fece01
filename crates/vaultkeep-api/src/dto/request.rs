//! Request DTOs.

use serde::{Deserialize, Serialize};

use vaultkeep_entity::tier::SubscriptionTier;

/// Body for POST /api/auth/register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired login name.
    pub login: String,
    /// Plaintext password.
    pub password: String,
    /// Initial subscription tier. Absent means no storage allowance.
    #[serde(default)]
    pub tier: SubscriptionTier,
}

/// Body for POST /api/auth/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub login: String,
    /// Plaintext password.
    pub password: String,
}

/// Body for PUT /api/account/tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeTierRequest {
    /// New subscription tier.
    pub tier: SubscriptionTier,
}

/// Body for creating or updating a credential secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRequest {
    /// Resource the credentials belong to.
    pub resource: String,
    /// Login at the resource.
    pub login: String,
    /// Password at the resource.
    pub password: String,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: String,
}

/// Body for creating or updating a text note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRequest {
    /// Unique label within the account.
    pub label: String,
    /// Note body.
    pub body: String,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: String,
}

/// Body for creating or updating a payment card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRequest {
    /// Card number.
    pub number: String,
    /// Cardholder name as printed.
    pub cardholder: String,
    /// Expiration in MM/YY form.
    pub expires_at: String,
    /// Card verification value.
    pub cvv: String,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: String,
}
