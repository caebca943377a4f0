//! # Auto-Accept Policy Engine
//!
//! Decides whether an exchange step may advance without external
//! confirmation. Stateless: everything comes from the policy and the
//! attachments supplied for the call.
//!
//! | Policy | Result |
//! |--------|--------|
//! | `Always` | `true` |
//! | `Never` | `false` |
//! | `ContentApproved` | current payload byte-identical to the previous step's |
//!
//! The attachment of the step under evaluation is required under every
//! policy. A missing previous attachment only means there is nothing to
//! approve against.

use crate::domain::{
    Attachment, AutoAcceptOptions, AutoAcceptPolicy, ExchangeStep, FormatError,
};

/// Byte-for-byte equality of two attachment payloads.
pub fn payloads_equal(current: &Attachment, previous: &Attachment) -> bool {
    current.same_content(previous)
}

/// Decide for `step` under the effective `policy`.
pub fn should_auto_respond(
    step: ExchangeStep,
    policy: AutoAcceptPolicy,
    options: &AutoAcceptOptions<'_>,
) -> Result<bool, FormatError> {
    match step {
        ExchangeStep::Proposal => should_auto_respond_to_proposal(policy, options),
        ExchangeStep::Offer => should_auto_respond_to_offer(policy, options),
        ExchangeStep::Request => should_auto_respond_to_request(policy, options),
        ExchangeStep::Credential => should_auto_respond_to_credential(policy, options),
    }
}

/// Issuer side: answer a proposal with the offer about to be sent.
pub fn should_auto_respond_to_proposal(
    policy: AutoAcceptPolicy,
    options: &AutoAcceptOptions<'_>,
) -> Result<bool, FormatError> {
    let proposal = options
        .proposal_attachment
        .ok_or_else(|| FormatError::MissingProposalAttachment {
            record_id: options.record.id().to_string(),
        })?;

    Ok(match policy {
        AutoAcceptPolicy::Always => true,
        AutoAcceptPolicy::Never => false,
        AutoAcceptPolicy::ContentApproved => options
            .offer_attachment
            .is_some_and(|offer| payloads_equal(proposal, offer)),
    })
}

/// Holder side: accept an offer that matches what was proposed.
pub fn should_auto_respond_to_offer(
    policy: AutoAcceptPolicy,
    options: &AutoAcceptOptions<'_>,
) -> Result<bool, FormatError> {
    let offer = options
        .offer_attachment
        .ok_or_else(|| FormatError::MissingOfferAttachment {
            record_id: options.record.id().to_string(),
        })?;

    Ok(match policy {
        AutoAcceptPolicy::Always => true,
        AutoAcceptPolicy::Never => false,
        AutoAcceptPolicy::ContentApproved => options
            .proposal_attachment
            .is_some_and(|proposal| payloads_equal(offer, proposal)),
    })
}

/// Issuer side: issue for a request matching the offer, or the proposal
/// when no offer was sent.
pub fn should_auto_respond_to_request(
    policy: AutoAcceptPolicy,
    options: &AutoAcceptOptions<'_>,
) -> Result<bool, FormatError> {
    let request = options
        .request_attachment
        .ok_or_else(|| FormatError::MissingRequestAttachment {
            record_id: options.record.id().to_string(),
        })?;

    Ok(match policy {
        AutoAcceptPolicy::Always => true,
        AutoAcceptPolicy::Never => false,
        AutoAcceptPolicy::ContentApproved => options
            .offer_attachment
            .or(options.proposal_attachment)
            .is_some_and(|previous| payloads_equal(request, previous)),
    })
}

/// Holder side: acknowledge a received credential.
pub fn should_auto_respond_to_credential(
    policy: AutoAcceptPolicy,
    options: &AutoAcceptOptions<'_>,
) -> Result<bool, FormatError> {
    let credential =
        options
            .credential_attachment
            .ok_or_else(|| FormatError::MissingCredentialAttachment {
                record_id: options.record.id().to_string(),
            })?;

    Ok(match policy {
        AutoAcceptPolicy::Always => true,
        AutoAcceptPolicy::Never => false,
        AutoAcceptPolicy::ContentApproved => credential_values_valid(options, credential),
    })
}

// TODO: compare credential attributes against the exchange's preview once
// the LD-proof offer carries one; every credential is accepted until then.
fn credential_values_valid(_options: &AutoAcceptOptions<'_>, _credential: &Attachment) -> bool {
    true
}
