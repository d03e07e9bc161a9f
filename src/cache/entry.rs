//! Cache Entry Module
//!
//! Defines a cached character record and its textual encoding.
//!
//! Encoded form is a JSON object `{"characterData": ..., "timestamp": ...}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// == Codec Errors ==
/// A stored value that does not parse as an entry.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Not valid JSON, or not a JSON object
    #[error("Malformed entry: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The object has no payload field
    #[error("Entry has no payload")]
    MissingPayload,

    /// The payload does not match the requested type
    #[error("Payload has unexpected shape: {0}")]
    InvalidPayload(serde_json::Error),
}

/// A payload that could not be serialized.
#[derive(Error, Debug)]
#[error("Failed to encode entry: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

// == Cache Entry ==
/// A decoded entry. `timestamp` is the write time in Unix milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub payload: T,
    /// None when the stored timestamp was absent or not an integer
    pub timestamp: Option<u64>,
}

/// Wire shape shared by the encoder and the lenient decoder.
#[derive(Serialize)]
struct EncodedEntry<'a, T> {
    #[serde(rename = "characterData")]
    payload: &'a T,
    timestamp: u64,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "characterData")]
    payload: Option<Value>,
    timestamp: Option<Value>,
}

impl RawEntry {
    fn parse(raw: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(raw)?)
    }

    fn timestamp(&self) -> Option<u64> {
        self.timestamp.as_ref().and_then(Value::as_u64)
    }
}

// == Encode ==
/// Encodes `payload` written at `timestamp`.
pub fn encode<T: Serialize>(payload: &T, timestamp: u64) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(&EncodedEntry { payload, timestamp })?)
}

// == Decode ==
/// Decodes a full entry. A missing or invalid timestamp is not an error.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<CacheEntry<T>, DecodeError> {
    let entry = RawEntry::parse(raw)?;
    let timestamp = entry.timestamp();

    let payload = match entry.payload {
        Some(Value::Null) | None => return Err(DecodeError::MissingPayload),
        Some(value) => serde_json::from_value(value).map_err(DecodeError::InvalidPayload)?,
    };

    Ok(CacheEntry { payload, timestamp })
}

/// Decodes only the timestamp, skipping payload conversion.
pub fn decode_timestamp(raw: &str) -> Result<Option<u64>, DecodeError> {
    let entry = RawEntry::parse(raw)?;
    if matches!(entry.payload, None | Some(Value::Null)) {
        return Err(DecodeError::MissingPayload);
    }
    Ok(entry.timestamp())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_uses_stored_field_names() {
        let raw = encode(&json!({"strokes": ["M 0 0"]}), 42).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["timestamp"], 42);
        assert_eq!(value["characterData"]["strokes"][0], "M 0 0");
    }

    #[test]
    fn test_decode_encoded_entry() {
        let payload = json!({"strokes": ["M 0 0 L 1 1"], "medians": [[[0, 0]]]});
        let raw = encode(&payload, 1_700_000_000_000).unwrap();

        let entry: CacheEntry<Value> = decode(&raw).unwrap();
        assert_eq!(entry.payload, payload);
        assert_eq!(entry.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let result = decode::<Value>("{\"characterData\":");
        assert!(matches!(result, Err(DecodeError::Malformed(_))));

        let result = decode::<Value>("42");
        assert!(matches!(result, Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_missing_payload() {
        let result = decode::<Value>(r#"{"timestamp": 5}"#);
        assert!(matches!(result, Err(DecodeError::MissingPayload)));

        let result = decode_timestamp(r#"{"characterData": null, "timestamp": 5}"#);
        assert!(matches!(result, Err(DecodeError::MissingPayload)));
    }

    #[test]
    fn test_decode_rejects_wrong_payload_type() {
        let raw = encode(&"just a string", 5).unwrap();
        let result = decode::<Vec<u32>>(&raw);
        assert!(matches!(result, Err(DecodeError::InvalidPayload(_))));
    }

    #[test]
    fn test_missing_or_invalid_timestamp_decodes_as_none() {
        let entry: CacheEntry<Value> = decode(r#"{"characterData": {}}"#).unwrap();
        assert_eq!(entry.timestamp, None);

        let entry: CacheEntry<Value> =
            decode(r#"{"characterData": {}, "timestamp": "yesterday"}"#).unwrap();
        assert_eq!(entry.timestamp, None);

        let entry: CacheEntry<Value> =
            decode(r#"{"characterData": {}, "timestamp": -3}"#).unwrap();
        assert_eq!(entry.timestamp, None);
    }

    #[test]
    fn test_decode_timestamp_only() {
        let raw = encode(&json!({"strokes": []}), 99).unwrap();
        assert_eq!(decode_timestamp(&raw).unwrap(), Some(99));
        assert!(decode_timestamp("garbage").is_err());
    }
}
