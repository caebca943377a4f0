//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for credential storage.

mod in_memory_store;

pub use in_memory_store::InMemoryCredentialStore;
