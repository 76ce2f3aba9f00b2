//! # LHT65N Codec Error Handling
//!
//! This module defines the error types that can occur in the lht65n-codec crate.
//! `DecodeError` covers the payload decoder itself; `CodecError` wraps it together
//! with the failures of the surrounding surfaces (configuration, payload text, I/O).

use thiserror::Error;

/// Represents the ways a single uplink decode can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload is shorter than the active mode requires.
    #[error("malformed payload: expected at least {expected} bytes, got {actual}")]
    MalformedPayload { expected: usize, actual: usize },

    /// A field read would run past the end of the payload.
    #[error("read of {size} bytes at offset {offset} exceeds payload length {len}")]
    OutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },

    /// The control byte matched neither the live nor the datalog layout.
    #[error("unknown message type")]
    UnknownMode(u8),
}

/// Represents the different error types that can occur around the decoder.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Indicates the payload itself could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Indicates an invalid decoder configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Indicates an invalid hexadecimal payload string.
    #[error("Invalid hex payload: {0}")]
    InvalidHex(String),

    /// Indicates an invalid base64 payload string.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// Indicates a file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Indicates malformed JSON input or a serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
