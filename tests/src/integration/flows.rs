//! # Integration Test Flows
//!
//! A holder and an issuer, each with its own format service, drive an
//! issue-credential exchange end to end. Attachments travel between them
//! the way a protocol engine would carry them inside messages.
//!
//! ## Flows Tested:
//!
//! 1. **Proposal first**: propose, offer, request, issue, store
//! 2. **Offer first**: the issuer starts without a proposal
//! 3. **Counter-offer**: a changed offer stops content-approved auto-accept
//! 4. **Collaborator failure**: signing errors reach the engine unchanged

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Once};

    use credex_jsonld::{
        AcceptCredentialOptions, AcceptProposalOptions, AcceptRequestOptions, Attachment,
        AutoAcceptOptions, AutoAcceptPolicy, CredentialFormatService, CredentialFormatType,
        CredentialFormats, ExchangeRecord, FormatError, FormatSpec, InMemoryCredentialStore,
        JsonLdCredentialFormatService, JsonLdFormatConfig, MockCredentialSigner,
        ProposeCredentialOptions, RequestCredentialFormatOptions, SignCredentialOptions,
        W3cVerifiableCredential, LD_PROOF_VC_FORMAT,
    };
    use credex_telemetry::{init_logging, TelemetryConfig};
    use serde_json::json;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    static LOGGING: Once = Once::new();

    fn init_test_logging() {
        LOGGING.call_once(|| {
            let config = TelemetryConfig::default().with_log_level("credex_jsonld=debug");
            // Another test binary may already own the global subscriber.
            let _ = init_logging(&config);
        });
    }

    type Service = JsonLdCredentialFormatService<MockCredentialSigner, InMemoryCredentialStore>;

    struct Party {
        service: Service,
        signer: Arc<MockCredentialSigner>,
        store: Arc<InMemoryCredentialStore>,
    }

    fn party(default_policy: AutoAcceptPolicy) -> Party {
        party_with_signer(default_policy, MockCredentialSigner::new())
    }

    fn party_with_signer(default_policy: AutoAcceptPolicy, signer: MockCredentialSigner) -> Party {
        let signer = Arc::new(signer);
        let store = Arc::new(InMemoryCredentialStore::new());
        let config = JsonLdFormatConfig::default().with_default_auto_accept(default_policy);
        let service =
            JsonLdCredentialFormatService::with_config(signer.clone(), store.clone(), config)
                .expect("valid config");
        Party {
            service,
            signer,
            store,
        }
    }

    fn university_degree() -> SignCredentialOptions {
        SignCredentialOptions {
            credential: json!({
                "@context": [
                    "https://www.w3.org/2018/credentials/v1",
                    "https://www.w3.org/2018/credentials/examples/v1"
                ],
                "id": "http://example.edu/credentials/1872",
                "type": ["VerifiableCredential", "UniversityDegreeCredential"],
                "issuer": "did:key:z6MkgjHWoLpomvXhJuAfkfsDALjN4tqE6f2LqRXQ5uDRxuDV",
                "issuanceDate": "2026-10-16T12:00:00Z",
                "credentialSubject": {
                    "id": "did:example:ebfeb1f712ebc6f1c276e12ec21",
                    "degree": {"type": "BachelorDegree", "name": "Bachelor of Science and Arts"}
                }
            }),
            proof_type: "Ed25519Signature2018".to_string(),
            verification_method: Some(
                "did:key:z6MkgjHWoLpomvXhJuAfkfsDALjN4tqE6f2LqRXQ5uDRxuDV#z6MkgjHWoLpomvXhJuAfkfsDALjN4tqE6f2LqRXQ5uDRxuDV"
                    .to_string(),
            ),
        }
    }

    // =============================================================================
    // FLOW 1: PROPOSAL FIRST
    // =============================================================================

    #[tokio::test]
    async fn test_proposal_first_exchange_auto_advances_under_content_approved() {
        init_test_logging();

        let holder = party(AutoAcceptPolicy::ContentApproved);
        let issuer = party(AutoAcceptPolicy::ContentApproved);
        let mut holder_record = ExchangeRecord::new("holder-exchange");
        let issuer_record = ExchangeRecord::new("issuer-exchange");

        // Holder proposes
        let proposal = holder
            .service
            .create_proposal(ProposeCredentialOptions {
                credential_formats: CredentialFormats::JsonLd(university_degree()),
            })
            .unwrap();

        // Issuer stages the proposal and answers with an offer
        let mut accept = AcceptProposalOptions {
            attach_id: Some(proposal.format.attach_id.clone()),
            proposal_attachment: Some(proposal.attachment.clone()),
            credential_formats: None,
        };
        issuer.service.process_proposal(&mut accept).unwrap();
        assert_eq!(
            accept.credential_formats,
            Some(CredentialFormats::JsonLd(university_degree()))
        );

        let offer = issuer.service.create_offer(&accept).unwrap();
        let decision = AutoAcceptOptions::new(&issuer_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment);
        assert!(issuer.service.should_auto_respond_to_proposal(&decision).unwrap());

        // Holder accepts the offer and requests
        holder
            .service
            .process_offer(&offer.attachment, &holder_record)
            .unwrap();
        let decision = AutoAcceptOptions::new(&holder_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment);
        assert!(holder.service.should_auto_respond_to_offer(&decision).unwrap());

        let request = holder
            .service
            .create_request(
                RequestCredentialFormatOptions {
                    offer_attachment: Some(offer.attachment.clone()),
                    credential_subject: None,
                },
                &holder_record,
            )
            .unwrap();

        // Issuer approves the request and issues
        let decision = AutoAcceptOptions::new(&issuer_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment)
            .request(&request.attachment);
        assert!(issuer.service.should_auto_respond_to_request(&decision).unwrap());

        let issued = issuer
            .service
            .create_credential(
                AcceptRequestOptions {
                    attach_id: Some(request.format.attach_id.clone()),
                },
                &issuer_record,
                Some(&request.attachment),
            )
            .await
            .unwrap();
        assert_eq!(issued.format.format, LD_PROOF_VC_FORMAT);
        assert_eq!(issued.attachment.id, request.attachment.id);
        assert_eq!(issuer.signer.recorded_calls(), vec![university_degree()]);

        // Holder acknowledges and stores
        let decision = AutoAcceptOptions::new(&holder_record).credential(&issued.attachment);
        assert!(holder.service.should_auto_respond_to_credential(&decision).unwrap());

        holder
            .service
            .process_credential(
                AcceptCredentialOptions {
                    credential_attachment: Some(issued.attachment.clone()),
                },
                &mut holder_record,
            )
            .await
            .unwrap();

        let bindings = holder_record.credentials();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].credential_record_type, CredentialFormatType::JsonLd);

        let stored = holder
            .store
            .get(&bindings[0].credential_record_id)
            .expect("credential stored");
        assert_eq!(
            stored.credential.canonical_id(),
            Some("http://example.edu/credentials/1872")
        );

        let holder_metrics = holder.service.metrics().snapshot();
        assert_eq!(holder_metrics.proposals_created, 1);
        assert_eq!(holder_metrics.requests_created, 1);
        assert_eq!(holder_metrics.credentials_stored, 1);
        assert_eq!(holder_metrics.auto_accept_granted, 2);

        let issuer_metrics = issuer.service.metrics().snapshot();
        assert_eq!(issuer_metrics.offers_created, 1);
        assert_eq!(issuer_metrics.credentials_signed, 1);
        assert!(issuer.store.is_empty());
    }

    #[tokio::test]
    async fn test_manual_exchange_never_auto_advances() {
        init_test_logging();

        let holder = party(AutoAcceptPolicy::Never);
        let issuer = party(AutoAcceptPolicy::Never);
        let holder_record = ExchangeRecord::new("holder-exchange");
        let issuer_record = ExchangeRecord::new("issuer-exchange");

        let proposal = holder
            .service
            .create_proposal(ProposeCredentialOptions {
                credential_formats: CredentialFormats::JsonLd(university_degree()),
            })
            .unwrap();
        let offer = issuer
            .service
            .create_offer(&AcceptProposalOptions {
                proposal_attachment: Some(proposal.attachment.clone()),
                ..Default::default()
            })
            .unwrap();

        let decision = AutoAcceptOptions::new(&issuer_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment);
        assert!(!issuer.service.should_auto_respond_to_proposal(&decision).unwrap());

        let decision = AutoAcceptOptions::new(&holder_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment);
        assert!(!holder.service.should_auto_respond_to_offer(&decision).unwrap());

        // A record-level policy overrides the agent default
        let eager_record =
            ExchangeRecord::new("eager-exchange").with_auto_accept(AutoAcceptPolicy::Always);
        let decision = AutoAcceptOptions::new(&eager_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment);
        assert!(holder.service.should_auto_respond_to_offer(&decision).unwrap());
    }

    // =============================================================================
    // FLOW 2: OFFER FIRST
    // =============================================================================

    #[tokio::test]
    async fn test_offer_first_exchange() {
        init_test_logging();

        let holder = party(AutoAcceptPolicy::ContentApproved);
        let issuer = party(AutoAcceptPolicy::ContentApproved);
        let mut holder_record = ExchangeRecord::new("holder-exchange");
        let issuer_record = ExchangeRecord::new("issuer-exchange");

        let offer = issuer
            .service
            .create_offer(&AcceptProposalOptions {
                credential_formats: Some(CredentialFormats::JsonLd(university_degree())),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(offer.format.attach_id, offer.attachment.id);
        assert!(offer.preview.attributes.is_empty());

        // Nothing was proposed, so there is nothing to approve the offer against
        let decision = AutoAcceptOptions::new(&holder_record).offer(&offer.attachment);
        assert!(!holder.service.should_auto_respond_to_offer(&decision).unwrap());

        let request = holder
            .service
            .create_request(
                RequestCredentialFormatOptions {
                    offer_attachment: Some(offer.attachment.clone()),
                    credential_subject: None,
                },
                &holder_record,
            )
            .unwrap();

        let decision = AutoAcceptOptions::new(&issuer_record)
            .offer(&offer.attachment)
            .request(&request.attachment);
        assert!(issuer.service.should_auto_respond_to_request(&decision).unwrap());

        // No attach id supplied: one is generated
        let issued = issuer
            .service
            .create_credential(
                AcceptRequestOptions::default(),
                &issuer_record,
                Some(&request.attachment),
            )
            .await
            .unwrap();
        assert!(!issued.format.attach_id.is_empty());
        assert_eq!(issued.format.attach_id, issued.attachment.id);

        let vc: W3cVerifiableCredential = issued.attachment.payload().unwrap().unwrap();
        assert_eq!(vc.proof["type"], "Ed25519Signature2018");

        holder
            .service
            .process_credential(
                AcceptCredentialOptions {
                    credential_attachment: Some(issued.attachment),
                },
                &mut holder_record,
            )
            .await
            .unwrap();
        assert_eq!(holder_record.credentials().len(), 1);
        assert_eq!(holder.store.len(), 1);
    }

    // =============================================================================
    // FLOW 3: COUNTER-OFFER
    // =============================================================================

    #[tokio::test]
    async fn test_counter_offer_requires_confirmation() {
        init_test_logging();

        let holder = party(AutoAcceptPolicy::ContentApproved);
        let issuer = party(AutoAcceptPolicy::ContentApproved);
        let holder_record = ExchangeRecord::new("holder-exchange");
        let issuer_record = ExchangeRecord::new("issuer-exchange");

        let proposal = holder
            .service
            .create_proposal(ProposeCredentialOptions {
                credential_formats: CredentialFormats::JsonLd(university_degree()),
            })
            .unwrap();

        // Issuer offers a different proof suite
        let mut counter = university_degree();
        counter.proof_type = "BbsBlsSignature2020".to_string();
        let offer = issuer
            .service
            .create_offer(&AcceptProposalOptions {
                credential_formats: Some(CredentialFormats::JsonLd(counter.clone())),
                ..Default::default()
            })
            .unwrap();

        let decision = AutoAcceptOptions::new(&issuer_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment);
        assert!(!issuer.service.should_auto_respond_to_proposal(&decision).unwrap());

        let decision = AutoAcceptOptions::new(&holder_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment);
        assert!(!holder.service.should_auto_respond_to_offer(&decision).unwrap());

        // The holder accepts manually; the request copies the counter-offer
        let request = holder
            .service
            .create_request(
                RequestCredentialFormatOptions {
                    offer_attachment: Some(offer.attachment.clone()),
                    credential_subject: None,
                },
                &holder_record,
            )
            .unwrap();
        assert_eq!(
            request.attachment.payload::<SignCredentialOptions>().unwrap(),
            Some(counter)
        );

        // The request matches the offer, which takes precedence over the proposal
        let decision = AutoAcceptOptions::new(&issuer_record)
            .proposal(&proposal.attachment)
            .offer(&offer.attachment)
            .request(&request.attachment);
        assert!(issuer.service.should_auto_respond_to_request(&decision).unwrap());
    }

    // =============================================================================
    // MESSAGE-LEVEL RESOLUTION
    // =============================================================================

    #[test]
    fn test_attachment_resolution_within_mixed_message() {
        init_test_logging();

        let holder = party(AutoAcceptPolicy::Never);
        let proposal = holder
            .service
            .create_proposal(ProposeCredentialOptions {
                credential_formats: CredentialFormats::JsonLd(university_degree()),
            })
            .unwrap();

        let other = Attachment::from_payload("anoncreds-0", &json!({"schema_id": "s"})).unwrap();
        let formats = vec![
            FormatSpec::new("anoncreds-0", "anoncreds/credential-filter@v1.0"),
            proposal.format.clone(),
        ];
        let attachments = vec![other, proposal.attachment.clone()];

        let found = holder.service.get_attachment(&formats, &attachments);
        assert_eq!(found, Some(&proposal.attachment));

        let foreign_only = vec![FormatSpec::new("anoncreds-0", "anoncreds/credential-filter@v1.0")];
        assert!(holder.service.get_attachment(&foreign_only, &attachments).is_none());
    }

    // =============================================================================
    // FLOW 4: COLLABORATOR FAILURE
    // =============================================================================

    #[tokio::test]
    async fn test_signing_failure_reaches_engine() {
        init_test_logging();

        let issuer = party_with_signer(AutoAcceptPolicy::Always, MockCredentialSigner::failing());
        let issuer_record = ExchangeRecord::new("issuer-exchange");
        let request = Attachment::from_payload("request-0", &university_degree()).unwrap();

        let err = issuer
            .service
            .create_credential(
                AcceptRequestOptions::default(),
                &issuer_record,
                Some(&request),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FormatError::Signing(_)));
        assert_eq!(issuer.signer.recorded_calls().len(), 1);
        assert_eq!(issuer.service.metrics().snapshot().credentials_signed, 0);
    }

    #[tokio::test]
    async fn test_format_service_behind_trait_object() {
        init_test_logging();

        let issuer = party(AutoAcceptPolicy::Always);
        let service: &dyn CredentialFormatService = &issuer.service;
        let record = ExchangeRecord::new("issuer-exchange");

        assert_eq!(service.format_type(), CredentialFormatType::JsonLd);
        assert!(matches!(
            service.delete_credential_by_id(&record).await,
            Err(FormatError::UnsupportedOperation { .. })
        ));
    }
}
