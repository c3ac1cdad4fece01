//! Password hashing and verification.

pub mod hasher;

pub use hasher::{INVALID_CREDENTIALS, PasswordHasher};
