//! # Algorithms Module
//!
//! Attachment resolution and auto-accept decisions. Both are pure.

pub mod auto_accept;
pub mod resolver;

pub use auto_accept::{
    payloads_equal, should_auto_respond, should_auto_respond_to_credential,
    should_auto_respond_to_offer, should_auto_respond_to_proposal,
    should_auto_respond_to_request,
};
pub use resolver::{find_format, get_attachment};
