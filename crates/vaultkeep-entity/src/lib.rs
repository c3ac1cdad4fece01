//! # vaultkeep-entity
//!
//! Domain entities shared between the server crates and the client:
//! accounts, subscription tiers, and the structured secret records.

pub mod account;
pub mod secret;
pub mod tier;

pub use account::Account;
pub use secret::{CardEntry, CredentialEntry, NoteEntry};
pub use tier::SubscriptionTier;
