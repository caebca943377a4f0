//! # Domain Value Objects
//!
//! Immutable value types for the LD-proof credential format.

use serde::{Deserialize, Serialize};

/// Format identifier of the issued credential attachment.
pub const LD_PROOF_VC_FORMAT: &str = "aries/ld-proof-vc@1.0";

/// Format identifier of the propose/offer/request attachment.
pub const LD_PROOF_VC_DETAIL_FORMAT: &str = "aries/ld-proof-vc-detail@v1.0";

/// Namespace prefix shared by every LD-proof format identifier.
///
/// Matching on the prefix tolerates version skew inside the family.
pub const LD_PROOF_FORMAT_FAMILY: &str = "aries/ld-proof-vc";

/// Well-known attach id used for proposals.
pub const PROPOSAL_ATTACH_ID: &str = "ld_proof";

/// Declares which attachment in a protocol message carries which format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSpec {
    /// Id of the attachment carrying this format, unique per message.
    pub attach_id: String,
    /// Versioned format identifier.
    pub format: String,
}

impl FormatSpec {
    /// Create a new format spec.
    pub fn new(attach_id: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            attach_id: attach_id.into(),
            format: format.into(),
        }
    }

    /// Format spec for a detail attachment with a freshly generated id.
    pub fn detail_with_generated_id() -> Self {
        Self::new(generate_attach_id(), LD_PROOF_VC_DETAIL_FORMAT)
    }

    /// Whether the format identifier belongs to the family with `prefix`.
    pub fn belongs_to_family(&self, prefix: &str) -> bool {
        self.format.starts_with(prefix)
    }
}

/// Generate a fresh attach id.
pub fn generate_attach_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Auto-accept policy for an exchange.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoAcceptPolicy {
    /// Advance every step automatically.
    Always,
    /// Never advance automatically.
    #[default]
    Never,
    /// Advance only when consecutive payloads are identical.
    ContentApproved,
}

impl AutoAcceptPolicy {
    /// Effective policy: the record's own setting wins over the agent
    /// default, and `Never` applies when neither is set.
    pub fn compose(record: Option<Self>, agent: Option<Self>) -> Self {
        record.or(agent).unwrap_or_default()
    }

    /// Parse the wire string form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            "contentApproved" => Some(Self::ContentApproved),
            _ => None,
        }
    }
}

/// Tag recorded on a credential binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialFormatType {
    /// JSON-LD / LD-proof credentials.
    JsonLd,
}

/// Protocol step an auto-accept decision is made for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeStep {
    /// Issuer received a proposal.
    Proposal,
    /// Holder received an offer.
    Offer,
    /// Issuer received a request.
    Request,
    /// Holder received the credential.
    Credential,
}

impl std::fmt::Display for ExchangeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Proposal => "proposal",
            Self::Offer => "offer",
            Self::Request => "request",
            Self::Credential => "credential",
        };
        f.write_str(name)
    }
}
