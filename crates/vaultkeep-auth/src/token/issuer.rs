//! Session token creation with configurable signing secret and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};

use vaultkeep_core::config::auth::AuthConfig;
use vaultkeep_core::error::AppError;
use vaultkeep_core::result::AppResult;

use super::claims::Claims;

/// Creates signed, time-limited session tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Default token TTL.
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            ttl: chrono::Duration::minutes(config.token_ttl_minutes as i64),
        }
    }

    /// Issues a token for the given account with the configured TTL.
    pub fn issue(&self, account_id: i64) -> AppResult<String> {
        self.issue_for_ttl(account_id, self.ttl)
    }

    /// Issues a token for the given account with an explicit TTL.
    pub fn issue_for_ttl(&self, account_id: i64, ttl: chrono::Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }
}
