//! Argon2id password hashing and verification.
//!
//! The salt is materialized as its own value alongside the derived hash so
//! the account row keeps both columns; verification re-derives the hash
//! from the stored salt and compares.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher as ArgonHasher, SaltString, rand_core::OsRng},
};

use vaultkeep_core::error::AppError;
use vaultkeep_core::result::AppResult;

/// Generic message returned for any credential mismatch.
///
/// The same wording is used whether the login does not exist or the
/// password is wrong, so callers leak nothing about account existence.
pub const INVALID_CREDENTIALS: &str = "invalid login or password";

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password with a freshly generated random salt.
    ///
    /// Returns `(hash, salt)` where the hash is a PHC string and the salt
    /// is its base64 form, suitable for separate column storage.
    pub fn hash_password(&self, password: &str) -> AppResult<(String, String)> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.derive(password, &salt)?;
        Ok((hash, salt.as_str().to_string()))
    }

    /// Verifies a plaintext password against a stored salt and hash.
    ///
    /// Returns an `Authentication` error with a generic message on
    /// mismatch; never reveals which part of the credentials failed.
    pub fn verify_password(&self, password: &str, salt: &str, hash: &str) -> AppResult<()> {
        let salt = SaltString::from_b64(salt)
            .map_err(|e| AppError::internal(format!("Invalid stored salt: {e}")))?;

        let recomputed = self.derive(password, &salt)?;
        if recomputed != hash {
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }
        Ok(())
    }

    fn derive(&self, password: &str, salt: &SaltString) -> AppResult<String> {
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultkeep_core::error::ErrorKind;

    #[test]
    fn hash_then_verify_succeeds() {
        let hasher = PasswordHasher::new();
        let (hash, salt) = hasher.hash_password("s3cret-passphrase").unwrap();
        hasher
            .verify_password("s3cret-passphrase", &salt, &hash)
            .unwrap();
    }

    #[test]
    fn wrong_password_is_rejected_with_generic_message() {
        let hasher = PasswordHasher::new();
        let (hash, salt) = hasher.hash_password("correct horse").unwrap();
        let err = hasher
            .verify_password("battery staple", &salt, &hash)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, INVALID_CREDENTIALS);
    }

    #[test]
    fn salts_are_unique_per_hash() {
        let hasher = PasswordHasher::new();
        let (hash_a, salt_a) = hasher.hash_password("same password").unwrap();
        let (hash_b, salt_b) = hasher.hash_password("same password").unwrap();
        assert_ne!(salt_a, salt_b);
        assert_ne!(hash_a, hash_b);
    }
}
