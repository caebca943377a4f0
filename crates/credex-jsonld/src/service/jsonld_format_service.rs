//! JSON-LD Credential Format Service
//!
//! Step handlers for the LD-proof format: builds and consumes the
//! attachments of each issue-credential step and delegates signing and
//! storage to the injected collaborators.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::algorithms::{self, auto_accept};
use crate::domain::{
    generate_attach_id, AcceptCredentialOptions, AcceptProposalOptions, AcceptRequestOptions,
    Attachment, AttachmentData, AutoAcceptOptions, AutoAcceptPolicy, ConfigError,
    CredentialBinding, CredentialFormatType, CredentialFormats, CredentialPreview, ExchangeRecord,
    ExchangeStep, FormatAttachment, FormatError, FormatSpec, JsonLdFormatConfig,
    OfferFormatAttachment, ProposeCredentialOptions, RequestCredentialFormatOptions,
    SignCredentialOptions, W3cVerifiableCredential, LD_PROOF_VC_DETAIL_FORMAT, LD_PROOF_VC_FORMAT,
    PROPOSAL_ATTACH_ID,
};
use crate::metrics::Metrics;
use crate::ports::{CredentialFormatService, CredentialSigner, CredentialStore};

/// LD-proof credential format service
///
/// Implements the `CredentialFormatService` port using injected collaborators.
/// Holds no per-exchange state: everything an exchange step needs is passed
/// in by the protocol engine, which serializes steps per exchange.
pub struct JsonLdCredentialFormatService<S: CredentialSigner, T: CredentialStore> {
    /// Signing collaborator (driven port)
    signer: Arc<S>,
    /// Storage collaborator (driven port)
    store: Arc<T>,
    /// Agent-level configuration
    config: JsonLdFormatConfig,
    /// Step and decision counters
    metrics: Metrics,
}

impl<S: CredentialSigner, T: CredentialStore> JsonLdCredentialFormatService<S, T> {
    /// Create a new service with the default configuration
    pub fn new(signer: Arc<S>, store: Arc<T>) -> Self {
        Self {
            signer,
            store,
            config: JsonLdFormatConfig::default(),
            metrics: Metrics::new(),
        }
    }

    /// Create with custom configuration
    pub fn with_config(
        signer: Arc<S>,
        store: Arc<T>,
        config: JsonLdFormatConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            signer,
            store,
            config,
            metrics: Metrics::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &JsonLdFormatConfig {
        &self.config
    }

    /// Step and decision counters
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Record policy, else the agent default, else `Never`.
    fn effective_policy(&self, record: &ExchangeRecord) -> AutoAcceptPolicy {
        AutoAcceptPolicy::compose(
            record.auto_accept_policy(),
            Some(self.config.default_auto_accept),
        )
    }

    fn decide(
        &self,
        step: ExchangeStep,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError> {
        let policy = self.effective_policy(options.record);
        let accept = auto_accept::should_auto_respond(step, policy, options)?;
        self.metrics.record_auto_accept(accept);

        debug!(
            record_id = %options.record.id(),
            %step,
            ?policy,
            accept,
            "[credex-jsonld] Auto-accept decision"
        );
        Ok(accept)
    }
}

/// Data of a proposal attachment that actually carries a payload.
fn proposal_data(options: &AcceptProposalOptions) -> Result<Option<AttachmentData>, FormatError> {
    if let Some(proposal) = &options.proposal_attachment {
        if proposal.payload_json()?.is_some() {
            return Ok(Some(proposal.data.clone()));
        }
    }
    Ok(None)
}

#[async_trait]
impl<S, T> CredentialFormatService for JsonLdCredentialFormatService<S, T>
where
    S: CredentialSigner + 'static,
    T: CredentialStore + 'static,
{
    fn format_type(&self) -> CredentialFormatType {
        CredentialFormatType::JsonLd
    }

    fn create_proposal(
        &self,
        options: ProposeCredentialOptions,
    ) -> Result<FormatAttachment, FormatError> {
        let format = FormatSpec::new(PROPOSAL_ATTACH_ID, LD_PROOF_VC_DETAIL_FORMAT);

        let payload = match options.credential_formats {
            CredentialFormats::JsonLd(payload) => payload,
        };
        let attachment = Attachment::from_payload(format.attach_id.clone(), &payload)?;

        self.metrics.record_proposal_created();
        debug!("[credex-jsonld] Created proposal attachment {}", attachment.id);
        Ok(FormatAttachment { format, attachment })
    }

    fn process_proposal(&self, options: &mut AcceptProposalOptions) -> Result<(), FormatError> {
        let proposal = match &options.proposal_attachment {
            Some(attachment) => attachment.payload::<SignCredentialOptions>()?,
            None => None,
        };
        let proposal = proposal.ok_or(FormatError::MissingPayload)?;

        options.credential_formats = Some(CredentialFormats::JsonLd(proposal));
        Ok(())
    }

    fn create_offer(
        &self,
        options: &AcceptProposalOptions,
    ) -> Result<OfferFormatAttachment, FormatError> {
        let attach_id = options.attach_id.clone().unwrap_or_else(generate_attach_id);
        let format = FormatSpec::new(attach_id, LD_PROOF_VC_DETAIL_FORMAT);

        // The exchange may begin with a proposal or directly with an offer
        let data = match proposal_data(options)? {
            Some(data) => data,
            None => {
                let supplied = options
                    .credential_formats
                    .as_ref()
                    .and_then(CredentialFormats::jsonld)
                    .ok_or(FormatError::MissingOfferPayload)?;
                AttachmentData::encode(supplied)?
            }
        };
        let attachment = Attachment::with_data(format.attach_id.clone(), data);

        self.metrics.record_offer_created();
        info!("[credex-jsonld] Created offer attachment {}", attachment.id);
        Ok(OfferFormatAttachment {
            format,
            preview: CredentialPreview::empty(),
            attachment,
        })
    }

    fn process_offer(
        &self,
        _attachment: &Attachment,
        _record: &ExchangeRecord,
    ) -> Result<(), FormatError> {
        Ok(())
    }

    fn create_request(
        &self,
        options: RequestCredentialFormatOptions,
        record: &ExchangeRecord,
    ) -> Result<FormatAttachment, FormatError> {
        let offer = options
            .offer_attachment
            .as_ref()
            .ok_or_else(|| FormatError::MissingOfferAttachment {
                record_id: record.id().to_string(),
            })?;
        let format = FormatSpec::detail_with_generated_id();

        let data = if offer.payload_json()?.is_some() {
            offer.data.clone()
        } else if let Some(subject) = &options.credential_subject {
            AttachmentData::encode(subject)?
        } else {
            return Err(FormatError::MissingRequestPayload {
                record_id: record.id().to_string(),
            });
        };
        let attachment = Attachment::with_data(format.attach_id.clone(), data);

        self.metrics.record_request_created();
        info!(
            record_id = %record.id(),
            "[credex-jsonld] Created request attachment {}", attachment.id
        );
        Ok(FormatAttachment { format, attachment })
    }

    fn process_request(
        &self,
        _attachment: &Attachment,
        _record: &ExchangeRecord,
    ) -> Result<(), FormatError> {
        Err(FormatError::UnsupportedOperation {
            operation: "process_request",
        })
    }

    async fn create_credential(
        &self,
        options: AcceptRequestOptions,
        record: &ExchangeRecord,
        request_attachment: Option<&Attachment>,
    ) -> Result<FormatAttachment, FormatError> {
        let missing = || FormatError::MissingRequestAttachment {
            record_id: record.id().to_string(),
        };
        let request = request_attachment.ok_or_else(missing)?;
        let sign_options: SignCredentialOptions = request.payload()?.ok_or_else(missing)?;

        let attach_id = options.attach_id.unwrap_or_else(generate_attach_id);
        let format = FormatSpec::new(attach_id, LD_PROOF_VC_FORMAT);

        debug!(
            record_id = %record.id(),
            proof_type = %sign_options.proof_type,
            "[credex-jsonld] Signing requested credential"
        );
        let verifiable_credential = self.signer.sign(&sign_options).await?;
        self.metrics.record_credential_signed();

        let attachment = Attachment::from_payload(format.attach_id.clone(), &verifiable_credential)?;
        info!(
            record_id = %record.id(),
            "[credex-jsonld] Created credential attachment {}", attachment.id
        );
        Ok(FormatAttachment { format, attachment })
    }

    async fn process_credential(
        &self,
        options: AcceptCredentialOptions,
        record: &mut ExchangeRecord,
    ) -> Result<(), FormatError> {
        let missing = || FormatError::MissingCredentialAttachment {
            record_id: record.id().to_string(),
        };
        let attachment = options.credential_attachment.as_ref().ok_or_else(missing)?;
        let credential: W3cVerifiableCredential = attachment.payload()?.ok_or_else(missing)?;

        let stored = self.store.store(credential).await?;

        if stored.credential.credential.canonical_id().is_none() {
            // Stored but unbound; the caller has to reconcile this record.
            warn!(
                record_id = %record.id(),
                stored_record_id = %stored.id,
                "[credex-jsonld] Stored credential has no id, binding not recorded"
            );
            return Err(FormatError::MissingCanonicalId {
                record_id: record.id().to_string(),
            });
        }

        record.append_binding(CredentialBinding {
            credential_record_type: CredentialFormatType::JsonLd,
            credential_record_id: stored.id.clone(),
        });
        self.metrics.record_credential_stored();

        info!(
            record_id = %record.id(),
            "[credex-jsonld] Bound credential record {}", stored.id
        );
        Ok(())
    }

    async fn delete_credential_by_id(&self, _record: &ExchangeRecord) -> Result<(), FormatError> {
        Err(FormatError::UnsupportedOperation {
            operation: "delete_credential_by_id",
        })
    }

    fn get_attachment<'a>(
        &self,
        formats: &[FormatSpec],
        attachments: &'a [Attachment],
    ) -> Option<&'a Attachment> {
        algorithms::get_attachment(formats, attachments, &self.config.format_family_prefix)
    }

    fn should_auto_respond_to_proposal(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError> {
        self.decide(ExchangeStep::Proposal, options)
    }

    fn should_auto_respond_to_offer(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError> {
        self.decide(ExchangeStep::Offer, options)
    }

    fn should_auto_respond_to_request(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError> {
        self.decide(ExchangeStep::Request, options)
    }

    fn should_auto_respond_to_credential(
        &self,
        options: &AutoAcceptOptions<'_>,
    ) -> Result<bool, FormatError> {
        self.decide(ExchangeStep::Credential, options)
    }
}
