//! # vaultkeep-service
//!
//! Business logic service layer for VaultKeep. Each service orchestrates
//! repositories, the object store, and authentication to implement
//! application-level use cases.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod object;
pub mod secret;

pub use account::AccountService;
pub use context::{RequestContext, with_timeout};
pub use object::ObjectService;
pub use secret::SecretService;
