//! Hybrid notification payload codec.
//!
//! A notification's `title` and `message` columns hold either a structured
//! JSON envelope (`{"key": .., "params": {..}}`) pointing at a translation
//! entry, or legacy free text written before the structured format existed.
//! [`decode`] is total: any input that is not a well-formed envelope comes
//! back as [`DecodedMessage::Legacy`] with the original string untouched, so
//! historical rows never become unreadable.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Named interpolation values carried inside a structured payload.
///
/// A `BTreeMap` keeps the serialized envelope deterministic.
pub type MessageParams = BTreeMap<String, String>;

/// The decoded form of a notification `title` or `message` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedMessage {
    /// A structured envelope: `key` names a translation entry, `params` are
    /// its interpolation values.
    Structured { key: String, params: MessageParams },
    /// Anything else. The original text is carried through unchanged.
    Legacy { text: String },
}

/// Wire shape of the structured envelope, parsed leniently.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    key: String,
    #[serde(default)]
    params: MessageParams,
}

/// Encode a translation key and its params as a structured envelope.
pub fn encode(key: &str, params: &MessageParams) -> String {
    serde_json::json!({ "key": key, "params": params }).to_string()
}

/// Decode a stored payload, degrading to [`DecodedMessage::Legacy`] on any
/// anomaly: input not starting with `{`, a JSON parse failure, a missing or
/// empty `key`, or params that are not a string-to-string object.
pub fn decode(raw: &str) -> DecodedMessage {
    if !raw.trim_start().starts_with('{') {
        return DecodedMessage::Legacy {
            text: raw.to_string(),
        };
    }
    match serde_json::from_str::<RawEnvelope>(raw) {
        Ok(envelope) if !envelope.key.is_empty() => DecodedMessage::Structured {
            key: envelope.key,
            params: envelope.params,
        },
        _ => DecodedMessage::Legacy {
            text: raw.to_string(),
        },
    }
}
