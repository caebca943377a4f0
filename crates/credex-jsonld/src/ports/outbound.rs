//! # Outbound Ports
//!
//! Traits for external collaborators (credential signing, credential storage).
//!
//! Both are injected into the service by the caller that assembles it.
//! Errors are surfaced to the protocol engine unchanged; retrying is the
//! collaborator's concern.

use crate::domain::{SignCredentialOptions, StoredCredentialRecord, W3cVerifiableCredential};
use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

/// Signing collaborator failure.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The verification method could not be resolved to a key.
    #[error("Unknown verification method: {0}")]
    UnknownVerificationMethod(String),

    /// The proof suite is not supported by the signer.
    #[error("Unsupported proof type: {0}")]
    UnsupportedProofType(String),

    /// The credential document is not signable.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// The signing operation timed out.
    #[error("Signing timed out")]
    Timeout,

    /// The signing operation was cancelled.
    #[error("Signing cancelled")]
    Cancelled,

    /// Any other signer failure.
    #[error("Signing failed: {0}")]
    Other(String),
}

/// Storage collaborator failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A record with the same id is already stored.
    #[error("Credential record already exists: {0}")]
    Duplicate(String),

    /// The storage backend is unavailable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The store operation timed out.
    #[error("Storage timed out")]
    Timeout,

    /// The store operation was cancelled.
    #[error("Storage cancelled")]
    Cancelled,
}

/// Credential signer - outbound port.
#[async_trait]
pub trait CredentialSigner: Send + Sync {
    /// Sign `options.credential` with `options.proof_type` using
    /// `options.verification_method`.
    async fn sign(
        &self,
        options: &SignCredentialOptions,
    ) -> Result<W3cVerifiableCredential, SigningError>;
}

/// Credential store - outbound port.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a verifiable credential.
    async fn store(
        &self,
        credential: W3cVerifiableCredential,
    ) -> Result<StoredCredentialRecord, StorageError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock signer for testing.
///
/// Attaches a fixed proof to the credential document and records every call.
#[derive(Default)]
pub struct MockCredentialSigner {
    /// Options of every `sign` call, in order.
    pub calls: Mutex<Vec<SignCredentialOptions>>,
    /// Should fail?
    pub should_fail: bool,
}

impl MockCredentialSigner {
    /// Create a signer that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a signer whose calls fail.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Options passed to the calls made so far.
    pub fn recorded_calls(&self) -> Vec<SignCredentialOptions> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CredentialSigner for MockCredentialSigner {
    async fn sign(
        &self,
        options: &SignCredentialOptions,
    ) -> Result<W3cVerifiableCredential, SigningError> {
        self.calls.lock().push(options.clone());

        if self.should_fail {
            return Err(SigningError::Other("Mock failure".to_string()));
        }

        let credential = serde_json::from_value(options.credential.clone())
            .map_err(|e| SigningError::InvalidCredential(e.to_string()))?;

        Ok(W3cVerifiableCredential {
            credential,
            proof: serde_json::json!({
                "type": options.proof_type,
                "verificationMethod": options.verification_method,
                "proofPurpose": "assertionMethod",
                "jws": "mock..signature",
            }),
        })
    }
}
