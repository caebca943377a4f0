//! # Format Spec Resolver
//!
//! Locates the attachment belonging to this format family in a protocol
//! message that may carry several formats.

use crate::domain::{Attachment, FormatSpec};

/// First format spec whose identifier starts with `family_prefix`.
pub fn find_format<'a>(formats: &'a [FormatSpec], family_prefix: &str) -> Option<&'a FormatSpec> {
    formats
        .iter()
        .find(|format| format.belongs_to_family(family_prefix))
}

/// Attachment referenced by this family's format spec.
///
/// `None` is an expected outcome in exchanges that mix formats.
pub fn get_attachment<'a>(
    formats: &[FormatSpec],
    attachments: &'a [Attachment],
    family_prefix: &str,
) -> Option<&'a Attachment> {
    let format = find_format(formats, family_prefix)?;
    attachments
        .iter()
        .find(|attachment| attachment.id == format.attach_id)
}
