//! In-Memory Credential Store Adapter
//!
//! Implements the `CredentialStore` port over a process-local map.

use crate::domain::{StoredCredentialRecord, W3cVerifiableCredential};
use crate::ports::outbound::{CredentialStore, StorageError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory credential store.
///
/// In production, this would be a wallet-backed repository.
pub struct InMemoryCredentialStore {
    /// Stored records: record id -> credential.
    records: RwLock<HashMap<String, W3cVerifiableCredential>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a stored credential.
    pub fn get(&self, record_id: &str) -> Option<W3cVerifiableCredential> {
        self.records.read().get(record_id).cloned()
    }

    /// Number of stored credentials.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn store(
        &self,
        credential: W3cVerifiableCredential,
    ) -> Result<StoredCredentialRecord, StorageError> {
        let id = uuid::Uuid::new_v4().to_string();

        self.records.write().insert(id.clone(), credential.clone());

        debug!("[credex-jsonld] Stored credential record {}", id);
        Ok(StoredCredentialRecord { id, credential })
    }
}
