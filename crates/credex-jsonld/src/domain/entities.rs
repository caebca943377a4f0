//! # Domain Entities
//!
//! Exchange record, credential binding and the credential documents that
//! flow through the LD-proof format.

use super::value_objects::{AutoAcceptPolicy, CredentialFormatType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type URI of the issue-credential v2 preview.
pub const CREDENTIAL_PREVIEW_TYPE: &str =
    "https://didcomm.org/issue-credential/2.0/credential-preview";

/// Link between an exchange and a persisted credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBinding {
    /// Format tag of the stored credential.
    pub credential_record_type: CredentialFormatType,
    /// Id of the stored credential record.
    pub credential_record_id: String,
}

/// One issuance conversation, owned by the protocol engine.
///
/// Bindings are append-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRecord {
    id: String,
    #[serde(default, rename = "autoAcceptCredential")]
    auto_accept_policy: Option<AutoAcceptPolicy>,
    #[serde(default)]
    credentials: Vec<CredentialBinding>,
}

impl ExchangeRecord {
    /// Create a record with no policy and no bindings.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            auto_accept_policy: None,
            credentials: Vec::new(),
        }
    }

    /// Set the record-level auto-accept policy.
    pub fn with_auto_accept(mut self, policy: AutoAcceptPolicy) -> Self {
        self.auto_accept_policy = Some(policy);
        self
    }

    /// Record id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record-level auto-accept policy, if set.
    pub fn auto_accept_policy(&self) -> Option<AutoAcceptPolicy> {
        self.auto_accept_policy
    }

    /// Bindings appended so far, in order.
    pub fn credentials(&self) -> &[CredentialBinding] {
        &self.credentials
    }

    pub(crate) fn append_binding(&mut self, binding: CredentialBinding) {
        self.credentials.push(binding);
    }
}

/// Unsigned W3C credential document.
///
/// Only the fields this format reads are typed; everything else is kept as is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct W3cCredential {
    /// Credential id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Claims about the subject.
    pub credential_subject: Value,
    /// Remaining document members (`@context`, `type`, `issuer`, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl W3cCredential {
    /// Non-empty credential id, if any.
    pub fn canonical_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Credential document with its linked-data proof.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct W3cVerifiableCredential {
    /// Signed document.
    #[serde(flatten)]
    pub credential: W3cCredential,
    /// Linked-data proof.
    pub proof: Value,
}

/// Record returned by the storage collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredCredentialRecord {
    /// Storage id.
    pub id: String,
    /// Stored credential.
    pub credential: W3cVerifiableCredential,
}

/// LD-proof detail payload: what to sign and how.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignCredentialOptions {
    /// Credential document to sign.
    pub credential: Value,
    /// Linked-data proof suite, e.g. `Ed25519Signature2018`.
    pub proof_type: String,
    /// Key reference used to sign.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<String>,
}

/// Format-specific payload, one variant per format family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CredentialFormats {
    /// LD-proof detail payload.
    #[serde(rename = "jsonld")]
    JsonLd(SignCredentialOptions),
}

impl CredentialFormats {
    /// LD-proof payload, if this is the JSON-LD variant.
    pub fn jsonld(&self) -> Option<&SignCredentialOptions> {
        match self {
            Self::JsonLd(options) => Some(options),
        }
    }
}

/// Human-readable attribute in a credential preview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CredentialPreviewAttribute {
    /// Attribute name.
    pub name: String,
    /// Mime type of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Attribute value.
    pub value: String,
}

/// Credential preview carried in the offer envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPreview {
    /// Preview type URI.
    #[serde(rename = "@type")]
    pub preview_type: String,
    /// Preview attributes.
    pub attributes: Vec<CredentialPreviewAttribute>,
}

impl CredentialPreview {
    /// Preview with no attributes; LD-proof offers carry no preview content.
    pub fn empty() -> Self {
        Self {
            preview_type: CREDENTIAL_PREVIEW_TYPE.to_string(),
            attributes: Vec::new(),
        }
    }
}
