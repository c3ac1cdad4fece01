//! # vaultkeep-core
//!
//! Core building blocks shared by every VaultKeep crate: the unified
//! [`error::AppError`] type, the [`result::AppResult`] alias, application
//! configuration, and the wire-frame codec used by the streaming object
//! transfer protocol.

pub mod config;
pub mod error;
pub mod result;
pub mod wire;
