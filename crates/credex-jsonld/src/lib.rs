//! # Credex JSON-LD Credential Format
//!
//! LD-proof (JSON-LD) credential format for the issue-credential exchange.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Produce and consume the format-specific attachments of each exchange step:
//! - Proposal, offer and request attachments carrying signing options
//! - Issuance through an injected signer, ingestion through an injected store
//! - Auto-accept decisions from the effective policy and payload equality
//!
//! ## Auto-Accept Policies
//!
//! | Policy | Behaviour |
//! |--------|-----------|
//! | `Always` | Advance without comparison |
//! | `Never` | Wait for external confirmation |
//! | `ContentApproved` | Advance when the payload equals the previous step's byte for byte |
//!
//! The record's policy wins over the agent default; with neither set the
//! effective policy is `Never`.
//!
//! ## Module Structure
//!
//! ```text
//! credex-jsonld/
//! ├── domain/          # Attachments, records, options, config, errors
//! ├── algorithms/      # Attachment resolution, auto-accept decisions
//! ├── ports/           # CredentialFormatService, CredentialSigner, CredentialStore
//! ├── adapters/        # In-memory credential store
//! └── service/         # JsonLdCredentialFormatService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryCredentialStore;
pub use algorithms::{find_format, get_attachment, payloads_equal, should_auto_respond};
pub use domain::{
    AcceptCredentialOptions, AcceptProposalOptions, AcceptRequestOptions, Attachment,
    AttachmentData, AutoAcceptOptions, AutoAcceptPolicy, ConfigError, CredentialBinding,
    CredentialFormatType, CredentialFormats, CredentialPreview, CredentialPreviewAttribute,
    ExchangeRecord, ExchangeStep, FormatAttachment, FormatError, FormatSpec, JsonLdFormatConfig,
    OfferFormatAttachment, ProposeCredentialOptions, RequestCredentialFormatOptions,
    SignCredentialOptions, StoredCredentialRecord, W3cCredential, W3cVerifiableCredential,
    LD_PROOF_FORMAT_FAMILY, LD_PROOF_VC_DETAIL_FORMAT, LD_PROOF_VC_FORMAT, PROPOSAL_ATTACH_ID,
};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{
    CredentialFormatService, CredentialSigner, CredentialStore, MockCredentialSigner,
    SigningError, StorageError,
};
pub use service::JsonLdCredentialFormatService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
