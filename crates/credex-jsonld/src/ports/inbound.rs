//! # Inbound Ports
//!
//! API trait a protocol engine (or a format registry) calls at each
//! exchange step.

use crate::domain::{
    AcceptCredentialOptions, AcceptProposalOptions, AcceptRequestOptions, Attachment,
    AutoAcceptOptions, CredentialFormatType, ExchangeRecord, FormatAttachment, FormatError,
    FormatSpec, OfferFormatAttachment, ProposeCredentialOptions, RequestCredentialFormatOptions,
};
use async_trait::async_trait;

/// Credential format service - inbound port.
#[async_trait]
pub trait CredentialFormatService: Send + Sync {
    /// Tag recorded on bindings created by this format.
    fn format_type(&self) -> CredentialFormatType;

    /// Build the proposal attachment.
    fn create_proposal(
        &self,
        options: ProposeCredentialOptions,
    ) -> Result<FormatAttachment, FormatError>;

    /// Parse a received proposal into `options.credential_formats`.
    fn process_proposal(&self, options: &mut AcceptProposalOptions) -> Result<(), FormatError>;

    /// Build the offer attachment from the proposal or supplied options.
    fn create_offer(
        &self,
        options: &AcceptProposalOptions,
    ) -> Result<OfferFormatAttachment, FormatError>;

    /// Validate a received offer.
    fn process_offer(
        &self,
        attachment: &Attachment,
        record: &ExchangeRecord,
    ) -> Result<(), FormatError>;

    /// Build the request attachment from the offer.
    fn create_request(
        &self,
        options: RequestCredentialFormatOptions,
        record: &ExchangeRecord,
    ) -> Result<FormatAttachment, FormatError>;

    /// Direct request processing. Not every format supports it.
    fn process_request(
        &self,
        attachment: &Attachment,
        record: &ExchangeRecord,
    ) -> Result<(), FormatError>;

    /// Sign the requested credential and build the issuance attachment.
    async fn create_credential(
        &self,
        options: AcceptRequestOptions,
        record: &ExchangeRecord,
        request_attachment: Option<&Attachment>,
    ) -> Result<FormatAttachment, FormatError>;

    /// Store a received credential and bind it to the exchange.
    async fn process_credential(
        &self,
        options: AcceptCredentialOptions,
        record: &mut ExchangeRecord,
    ) -> Result<(), FormatError>;

    /// Delete the credentials bound to an exchange. Not every format supports it.
    async fn delete_credential_by_id(&self, record: &ExchangeRecord) -> Result<(), FormatError>;

    /// Attachment of this format in a protocol message, if any.
    fn get_attachment<'a>(
        &self,
        formats: &[FormatSpec],
        attachments: &'a [Attachment],
    ) -> Option<&'a Attachment>;

    /// Whether a proposal may be answered automatically.
    fn should_auto_respond_to_proposal(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError>;

    /// Whether an offer may be answered automatically.
    fn should_auto_respond_to_offer(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError>;

    /// Whether a request may be answered automatically.
    fn should_auto_respond_to_request(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError>;

    /// Whether a credential may be acknowledged automatically.
    fn should_auto_respond_to_credential(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError>;
}
