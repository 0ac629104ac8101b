//! Mailbox message structure (Gmail API `format=full` shape).

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// URL-safe base64 that accepts data with or without padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub payload: MessagePart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
    #[serde(default)]
    pub size: u64,
    /// Inline content, URL-safe base64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// One node of a message's MIME tree. Parts may nest arbitrarily deep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: PartBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<MessagePart>>,
}

/// What a part is, for tree walks.
#[derive(Debug)]
pub enum PartKind<'a> {
    Container(&'a [MessagePart]),
    Attachment {
        filename: &'a str,
        attachment_id: &'a str,
    },
    Other,
}

impl MessagePart {
    pub fn kind(&self) -> PartKind<'_> {
        if let Some(parts) = &self.parts {
            return PartKind::Container(parts);
        }
        match &self.body.attachment_id {
            Some(attachment_id) if !self.filename.is_empty() => PartKind::Attachment {
                filename: &self.filename,
                attachment_id,
            },
            _ => PartKind::Other,
        }
    }

    /// Value of the first header with this name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Plain-text body: the first top-level `text/plain` part, else the
    /// payload's own body data. Anything undecodable yields "".
    pub fn plain_body(&self) -> String {
        match &self.parts {
            Some(parts) => parts
                .iter()
                .find(|p| p.mime_type == "text/plain")
                .and_then(|p| p.body.data.as_deref())
                .map(decode_text)
                .unwrap_or_default(),
            None => self
                .body
                .data
                .as_deref()
                .map(decode_text)
                .unwrap_or_default(),
        }
    }
}

/// Decode URL-safe base64 data.
pub fn decode_data(data: &str) -> Option<Vec<u8>> {
    URL_SAFE_LENIENT.decode(data.trim()).ok()
}

/// Encode bytes the way message bodies carry them.
pub fn encode_data(bytes: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(bytes)
}

fn decode_text(data: &str) -> String {
    let Some(bytes) = decode_data(data) else {
        warn!("message body is not valid base64");
        return String::new();
    };
    String::from_utf8(bytes).unwrap_or_else(|_| {
        warn!("message body is not valid UTF-8");
        String::new()
    })
}
