//! # Domain Errors
//!
//! Error types for the LD-proof credential format.
//!
//! Absence that callers must expect (no matching attachment in a message)
//! is modelled as `Option` by the resolver and never appears here.

use crate::ports::outbound::{SigningError, StorageError};
use thiserror::Error;

/// LD-proof format error types.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Proposal attachment carried no signing-options payload.
    #[error("Missing jsonld credential proposal data payload")]
    MissingPayload,

    /// Proposal attachment required by the proposal auto-accept check.
    #[error("Missing proposal attachment for credential record {record_id}")]
    MissingProposalAttachment {
        /// Exchange record id
        record_id: String,
    },

    /// Neither a proposal attachment nor supplied options to build an offer from.
    #[error("Create jsonld offer: missing credential attachment")]
    MissingOfferPayload,

    /// No offer attachment available.
    #[error("Missing attachment from offer message, credential record id = {record_id}")]
    MissingOfferAttachment {
        /// Exchange record id
        record_id: String,
    },

    /// Offer carried no payload and no credential subject was supplied.
    #[error("Missing request payload for credential record {record_id}")]
    MissingRequestPayload {
        /// Exchange record id
        record_id: String,
    },

    /// No request attachment available.
    #[error("Missing request attachment from request message, credential record id = {record_id}")]
    MissingRequestAttachment {
        /// Exchange record id
        record_id: String,
    },

    /// No credential attachment available.
    #[error("Missing credential attachment for credential record {record_id}")]
    MissingCredentialAttachment {
        /// Exchange record id
        record_id: String,
    },

    /// Stored credential has no stable identifier.
    #[error("Missing credential id in verifiable credential for credential record {record_id}")]
    MissingCanonicalId {
        /// Exchange record id
        record_id: String,
    },

    /// Optional protocol capability not implemented by this format.
    #[error("Operation not supported by the jsonld format: {operation}")]
    UnsupportedOperation {
        /// Operation name
        operation: &'static str,
    },

    /// Attachment data could not be decoded or parsed.
    #[error("Invalid attachment payload: {0}")]
    InvalidPayload(String),

    /// Signing collaborator failure, surfaced unchanged.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// Storage collaborator failure, surfaced unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown auto-accept policy string.
    #[error("Invalid auto-accept policy: {0} (expected always, never or contentApproved)")]
    InvalidAutoAccept(String),

    /// Format family prefix is empty.
    #[error("Format family prefix cannot be empty")]
    EmptyFormatFamily,
}

impl FormatError {
    /// Whether this error belongs to the missing-attachment family.
    pub fn is_missing_attachment(&self) -> bool {
        matches!(
            self,
            Self::MissingPayload
                | Self::MissingProposalAttachment { .. }
                | Self::MissingOfferPayload
                | Self::MissingOfferAttachment { .. }
                | Self::MissingRequestPayload { .. }
                | Self::MissingRequestAttachment { .. }
                | Self::MissingCredentialAttachment { .. }
        )
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}
