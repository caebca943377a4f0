//! # Step Options
//!
//! Inputs and outputs of the exchange step handlers.

use super::attachment::Attachment;
use super::entities::{CredentialFormats, CredentialPreview, ExchangeRecord};
use super::value_objects::FormatSpec;
use serde_json::Value;

/// Input to `create_proposal`.
#[derive(Clone, Debug)]
pub struct ProposeCredentialOptions {
    /// Payload to propose.
    pub credential_formats: CredentialFormats,
}

/// Input to `process_proposal` and `create_offer`.
///
/// `credential_formats` doubles as the staged options: `process_proposal`
/// writes the parsed proposal here for the following steps.
#[derive(Clone, Debug, Default)]
pub struct AcceptProposalOptions {
    /// Attach id to reuse for the produced attachment.
    pub attach_id: Option<String>,
    /// Proposal attachment received from the holder.
    pub proposal_attachment: Option<Attachment>,
    /// Supplied or staged payload.
    pub credential_formats: Option<CredentialFormats>,
}

/// Input to `create_request`.
#[derive(Clone, Debug, Default)]
pub struct RequestCredentialFormatOptions {
    /// Offer attachment received from the issuer.
    pub offer_attachment: Option<Attachment>,
    /// Credential subject to request when the offer carries no payload.
    pub credential_subject: Option<Value>,
}

/// Input to `create_credential`.
#[derive(Clone, Debug, Default)]
pub struct AcceptRequestOptions {
    /// Attach id to reuse for the issuance attachment.
    pub attach_id: Option<String>,
}

/// Input to `process_credential`.
#[derive(Clone, Debug, Default)]
pub struct AcceptCredentialOptions {
    /// Issuance attachment received from the issuer.
    pub credential_attachment: Option<Attachment>,
}

/// Attachments available when an auto-accept decision is made.
#[derive(Clone, Copy, Debug)]
pub struct AutoAcceptOptions<'a> {
    /// Exchange the decision is for.
    pub record: &'a ExchangeRecord,
    /// Proposal attachment, if exchanged.
    pub proposal_attachment: Option<&'a Attachment>,
    /// Offer attachment, if exchanged.
    pub offer_attachment: Option<&'a Attachment>,
    /// Request attachment, if exchanged.
    pub request_attachment: Option<&'a Attachment>,
    /// Credential attachment, if exchanged.
    pub credential_attachment: Option<&'a Attachment>,
}

impl<'a> AutoAcceptOptions<'a> {
    /// Options with no attachments.
    pub fn new(record: &'a ExchangeRecord) -> Self {
        Self {
            record,
            proposal_attachment: None,
            offer_attachment: None,
            request_attachment: None,
            credential_attachment: None,
        }
    }

    /// Set the proposal attachment.
    pub fn proposal(mut self, attachment: &'a Attachment) -> Self {
        self.proposal_attachment = Some(attachment);
        self
    }

    /// Set the offer attachment.
    pub fn offer(mut self, attachment: &'a Attachment) -> Self {
        self.offer_attachment = Some(attachment);
        self
    }

    /// Set the request attachment.
    pub fn request(mut self, attachment: &'a Attachment) -> Self {
        self.request_attachment = Some(attachment);
        self
    }

    /// Set the credential attachment.
    pub fn credential(mut self, attachment: &'a Attachment) -> Self {
        self.credential_attachment = Some(attachment);
        self
    }
}

/// Format spec paired with the attachment it describes.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatAttachment {
    /// Format spec for the message's `formats` list.
    pub format: FormatSpec,
    /// Attachment for the message's attachment list.
    pub attachment: Attachment,
}

/// Output of `create_offer`.
#[derive(Clone, Debug, PartialEq)]
pub struct OfferFormatAttachment {
    /// Format spec for the message's `formats` list.
    pub format: FormatSpec,
    /// Preview required by the offer envelope, always empty here.
    pub preview: CredentialPreview,
    /// Attachment for the message's attachment list.
    pub attachment: Attachment,
}
