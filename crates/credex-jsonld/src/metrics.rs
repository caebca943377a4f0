//! Metrics hooks for exchange step handling
//!
//! Counts produced attachments, collaborator calls and auto-accept outcomes.
//!
//! ## Usage
//!
//! ```ignore
//! let service = JsonLdCredentialFormatService::new(signer, store);
//! // ... drive an exchange ...
//! let snapshot = service.metrics().snapshot();
//! println!("auto-accepted: {}", snapshot.auto_accept_granted);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for the LD-proof format service
#[derive(Default)]
pub struct Metrics {
    /// Proposal attachments created
    pub proposals_created: AtomicU64,
    /// Offer attachments created
    pub offers_created: AtomicU64,
    /// Request attachments created
    pub requests_created: AtomicU64,
    /// Credentials signed by the signing collaborator
    pub credentials_signed: AtomicU64,
    /// Credentials stored and bound to an exchange
    pub credentials_stored: AtomicU64,
    /// Auto-accept decisions that advanced the exchange
    pub auto_accept_granted: AtomicU64,
    /// Auto-accept decisions that left the step for confirmation
    pub auto_accept_denied: AtomicU64,
}

/// Point-in-time copy of [`Metrics`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct MetricsSnapshot {
    pub proposals_created: u64,
    pub offers_created: u64,
    pub requests_created: u64,
    pub credentials_signed: u64,
    pub credentials_stored: u64,
    pub auto_accept_granted: u64,
    pub auto_accept_denied: u64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a created proposal attachment
    pub fn record_proposal_created(&self) {
        self.proposals_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a created offer attachment
    pub fn record_offer_created(&self) {
        self.offers_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a created request attachment
    pub fn record_request_created(&self) {
        self.requests_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a credential signed by the signer
    pub fn record_credential_signed(&self) {
        self.credentials_signed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a credential stored and bound to an exchange
    pub fn record_credential_stored(&self) {
        self.credentials_stored.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the outcome of an auto-accept decision
    pub fn record_auto_accept(&self, granted: bool) {
        if granted {
            self.auto_accept_granted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.auto_accept_denied.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            proposals_created: self.proposals_created.load(Ordering::Relaxed),
            offers_created: self.offers_created.load(Ordering::Relaxed),
            requests_created: self.requests_created.load(Ordering::Relaxed),
            credentials_signed: self.credentials_signed.load(Ordering::Relaxed),
            credentials_stored: self.credentials_stored.load(Ordering::Relaxed),
            auto_accept_granted: self.auto_accept_granted.load(Ordering::Relaxed),
            auto_accept_denied: self.auto_accept_denied.load(Ordering::Relaxed),
        }
    }
}
