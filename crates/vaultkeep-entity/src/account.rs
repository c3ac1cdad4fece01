//! Account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tier::SubscriptionTier;

/// A registered vault account.
///
/// The password hash and salt are set once at registration and never
/// change; the subscription tier may be updated at any time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Primary key, assigned at creation.
    pub id: i64,
    /// Unique login name.
    pub login: String,
    /// Argon2id PHC-string password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Base64 salt used to derive the hash.
    #[serde(skip_serializing)]
    pub salt: String,
    /// Current subscription tier.
    pub tier: SubscriptionTier,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
