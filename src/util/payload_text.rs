//! # Payload Text Encodings
//!
//! Network servers and test captures hand uplink payloads around as text:
//! ChirpStack uses base64, most vendor tools and logs use hex. These helpers
//! turn either form back into bytes and format bytes for log output.
//!
//! ```rust
//! use lht65n_codec::util::payload_text::{decode_base64, decode_hex, format_hex_compact};
//!
//! let bytes = decode_base64("zAgKMQIHAX//f/8=").unwrap();
//! assert_eq!(bytes, decode_hex("cc 08 0a 31 02 07 01 7f ff 7f ff").unwrap());
//! assert_eq!(format_hex_compact(&bytes[..2]), "cc 08");
//! ```

use crate::error::CodecError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Payload text encodings accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    Hex,
    Base64,
}

/// Decode a payload in the given encoding.
pub fn decode_payload_text(text: &str, encoding: PayloadEncoding) -> Result<Vec<u8>, CodecError> {
    match encoding {
        PayloadEncoding::Hex => decode_hex(text),
        PayloadEncoding::Base64 => decode_base64(text),
    }
}

/// Decode a hex string, ignoring whitespace and `:`/`-` separators.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, CodecError> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(CodecError::InvalidHex("empty payload".to_string()));
    }

    hex::decode(&cleaned).map_err(|e| CodecError::InvalidHex(e.to_string()))
}

/// Decode standard (padded) base64 as used by ChirpStack.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, CodecError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CodecError::InvalidBase64("empty payload".to_string()));
    }

    STANDARD
        .decode(trimmed)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}

/// Encode bytes as standard base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Format bytes as "cc 08 0a" for log output.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
