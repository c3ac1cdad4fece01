//! # vaultkeep-auth
//!
//! The credential engine (Argon2id password hashing with explicit salt
//! handling) and the stateless session-token issuer/verifier (HS256 JWT).

pub mod password;
pub mod token;

pub use password::hasher::PasswordHasher;
pub use token::issuer::TokenIssuer;
pub use token::verifier::TokenVerifier;
