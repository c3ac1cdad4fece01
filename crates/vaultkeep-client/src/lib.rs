//! # vaultkeep-client
//!
//! HTTP client for the VaultKeep server. Wraps the REST endpoints, the
//! framed object transfer protocol, and transparent one-shot
//! re-authentication when a session token expires mid-session.

pub mod client;
pub mod transfer;

pub use client::VaultClient;
