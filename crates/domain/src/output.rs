//! Output records handed back to the workflow host
//!
//! Every input item produces exactly one record: an [`OutputItem`] on
//! success or an [`ErrorRecord`] when the item failed and the batch was
//! allowed to continue. Both carry the index of the input item they belong to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named binary blob attached to an output item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryAttachment {
    /// Raw file contents (base64 on the wire).
    #[serde(with = "serde_bytes_base64")]
    pub data: Vec<u8>,
    /// Suggested file name (e.g., "tweet.png").
    pub file_name: String,
    /// MIME type of the contents.
    pub mime_type: String,
    /// File extension without the leading dot.
    pub file_extension: String,
}

impl BinaryAttachment {
    /// Creates an attachment named `<stem>.<extension>`.
    #[must_use]
    pub fn new(data: Vec<u8>, stem: &str, extension: &str, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            file_name: format!("{stem}.{extension}"),
            mime_type: mime_type.into(),
            file_extension: extension.to_string(),
        }
    }

    /// Returns the attachment size in bytes.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the attachment holds no data.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Successful result for one input item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    /// Structured payload, empty when the result is a binary attachment.
    pub json: Map<String, Value>,
    /// Binary attachment, if the response was raw media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BinaryAttachment>,
    /// Index of the input item this record belongs to.
    pub paired_item: usize,
}

impl OutputItem {
    /// Creates an item carrying a JSON payload only.
    #[must_use]
    pub const fn json(paired_item: usize, json: Map<String, Value>) -> Self {
        Self {
            json,
            binary: None,
            paired_item,
        }
    }

    /// Creates an item carrying a binary attachment and an empty payload.
    #[must_use]
    pub fn binary(paired_item: usize, attachment: BinaryAttachment) -> Self {
        Self {
            json: Map::new(),
            binary: Some(attachment),
            paired_item,
        }
    }
}

/// Failure record for one input item, emitted in place of an [`OutputItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Payload of the form `{ "error": <message> }`.
    pub json: Map<String, Value>,
    /// Index of the input item this record belongs to.
    pub paired_item: usize,
}

impl ErrorRecord {
    /// Creates an error record for the given item.
    #[must_use]
    pub fn new(paired_item: usize, message: impl Into<String>) -> Self {
        let mut json = Map::new();
        json.insert("error".to_string(), Value::String(message.into()));
        Self { json, paired_item }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.json
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Outcome of processing one input item.
pub type ItemOutcome = Result<OutputItem, ErrorRecord>;

mod serde_bytes_base64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
