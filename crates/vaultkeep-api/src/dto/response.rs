//! Response DTOs.

use serde::{Deserialize, Serialize};

use vaultkeep_entity::tier::SubscriptionTier;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Session token returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for the Authorization header.
    pub token: String,
}

/// Account summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: i64,
    /// Login name.
    pub login: String,
    /// Current subscription tier.
    pub tier: SubscriptionTier,
}

/// Object listing with current usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectListResponse {
    /// Stored object names, sorted.
    pub objects: Vec<String>,
    /// Current byte usage.
    pub used_bytes: u64,
}

/// Result of a completed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Stored object name.
    pub name: String,
    /// Stored object size in bytes.
    pub bytes: u64,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
