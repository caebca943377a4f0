//! Service Layer
//!
//! Application service that drives the LD-proof exchange steps and
//! coordinates the signing and storage collaborators via ports.

pub mod jsonld_format_service;

pub use jsonld_format_service::JsonLdCredentialFormatService;
