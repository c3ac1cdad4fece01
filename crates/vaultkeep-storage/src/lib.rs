//! # vaultkeep-storage
//!
//! The quota-tracked binary object store. Objects live on the local
//! filesystem under one flat directory per account; an in-memory catalog
//! of per-account object sizes, rebuilt at startup, is the authoritative
//! usage ledger for subscription-tier quota enforcement.

pub mod store;

pub use store::{ObjectStore, ObjectStream};
