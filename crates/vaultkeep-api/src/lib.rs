//! # vaultkeep-api
//!
//! HTTP API layer for VaultKeep built on Axum.
//!
//! Provides the REST endpoints, framed object transfer, middleware
//! (correlation logging, token auth), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_state;
pub use router::build_router;
pub use state::AppState;
