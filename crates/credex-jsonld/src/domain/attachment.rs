//! # Attachment Codec
//!
//! Wraps opaque payloads as identified attachments and reads them back.
//!
//! Attachments produced here are base64-encoded JSON; attachments received
//! from a peer may use either the `base64` or the inline `json` encoding.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::FormatError;

/// Mime type of attachments produced by this format.
pub const JSON_MIME_TYPE: &str = "application/json";

// Peers may send padded or unpadded base64 in either alphabet.
const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

fn decode_base64(encoded: &str) -> Result<Vec<u8>, FormatError> {
    STANDARD_LENIENT
        .decode(encoded)
        .or_else(|e| URL_SAFE_LENIENT.decode(encoded).map_err(|_| e))
        .map_err(|e| FormatError::InvalidPayload(format!("base64: {}", e)))
}

/// Payload carried by an attachment, in one of the two wire encodings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentData {
    /// Base64 of the serialized JSON payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    /// Inline JSON payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
    /// Remaining data members (`jws`, `sha256`, `links`, ...), kept so
    /// content comparison covers the whole object.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl AttachmentData {
    /// Encode a payload as base64 JSON.
    pub fn encode<T: Serialize>(payload: &T) -> Result<Self, FormatError> {
        let bytes = serde_json::to_vec(payload)?;
        Ok(Self {
            base64: Some(STANDARD.encode(bytes)),
            ..Default::default()
        })
    }

    /// Decode the payload as JSON, whichever encoding it uses.
    ///
    /// Returns `None` when no encoding is present or the payload is `null`.
    pub fn decode_json(&self) -> Result<Option<Value>, FormatError> {
        let value = if let Some(encoded) = &self.base64 {
            let bytes = decode_base64(encoded)?;
            serde_json::from_slice::<Value>(&bytes)?
        } else if let Some(json) = &self.json {
            json.clone()
        } else {
            return Ok(None);
        };

        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(value))
    }
}

/// Identified payload carried inside a protocol message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment id, referenced by a format spec's attach id.
    #[serde(rename = "@id")]
    pub id: String,
    /// Mime type of the decoded payload.
    #[serde(rename = "mime-type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Encoded payload.
    pub data: AttachmentData,
}

impl Attachment {
    /// Wrap `payload` as a base64 JSON attachment with the given id.
    pub fn from_payload<T: Serialize>(
        id: impl Into<String>,
        payload: &T,
    ) -> Result<Self, FormatError> {
        Ok(Self::with_data(id, AttachmentData::encode(payload)?))
    }

    /// Attachment carrying already-encoded data under a new id.
    pub fn with_data(id: impl Into<String>, data: AttachmentData) -> Self {
        Self {
            id: id.into(),
            mime_type: Some(JSON_MIME_TYPE.to_string()),
            data,
        }
    }

    /// Payload as untyped JSON.
    pub fn payload_json(&self) -> Result<Option<Value>, FormatError> {
        self.data.decode_json()
    }

    /// Payload deserialized into `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<Option<T>, FormatError> {
        match self.payload_json()? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Byte-for-byte comparison of the serialized data of two attachments.
    ///
    /// Key order and encoding choice are significant.
    pub fn same_content(&self, other: &Attachment) -> bool {
        match (serde_json::to_vec(&self.data), serde_json::to_vec(&other.data)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
