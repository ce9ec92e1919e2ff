//! Payload decoding
//!
//! Raw captured payloads arrive as bytes from the I/O layer. Decoding is the
//! only place where malformed input is detected; everything downstream works
//! on already-decoded values.

use crate::error::{Error, Result};
use crate::types::JsonValue;

/// Decode a raw JSON payload.
///
/// Leading/trailing whitespace is tolerated. An empty payload is a parse error.
pub fn decode_payload(bytes: &[u8]) -> Result<JsonValue> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::parse("empty payload"));
    }
    serde_json::from_slice(bytes).map_err(|e| Error::parse(e.to_string()))
}

/// Decode a payload held as text
pub fn decode_str(text: &str) -> Result<JsonValue> {
    decode_payload(text.as_bytes())
}
