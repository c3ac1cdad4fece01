//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use vaultkeep_core::config::auth::AuthConfig;
use vaultkeep_core::error::AppError;
use vaultkeep_core::result::AppResult;

use super::claims::Claims;

/// Validates session tokens and resolves the embedded account ID.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a token string and returns the account ID it was issued to.
    ///
    /// Every structural, signature, or expiry failure collapses into one
    /// `Authentication` outcome; no detail about the failure leaks to the
    /// caller.
    pub fn verify(&self, token: &str) -> AppResult<i64> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| AppError::authentication("invalid or expired session token"))?;
        Ok(data.claims.account_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::issuer::TokenIssuer;
    use vaultkeep_core::error::ErrorKind;

    fn test_config() -> AuthConfig {
        AuthConfig {
            token_secret: "unit-test-secret".to_string(),
            token_ttl_minutes: 30,
            password_min_length: 8,
        }
    }

    #[test]
    fn fresh_token_resolves_account_id() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        let token = issuer.issue(42).unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), 42);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        // Expired two minutes ago, well past the clock-skew leeway.
        let token = issuer
            .issue_for_ttl(42, chrono::Duration::seconds(-120))
            .unwrap();
        let err = verifier.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = TokenIssuer::new(&test_config());
        let other = AuthConfig {
            token_secret: "a different secret".to_string(),
            ..test_config()
        };
        let verifier = TokenVerifier::new(&other);

        let token = issuer.issue(7).unwrap();
        let err = verifier.verify(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let verifier = TokenVerifier::new(&test_config());
        let err = verifier.verify("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
