//! # Utility Modules
//!
//! Helpers shared by the library and the command-line tool.

pub mod payload_text;

pub use payload_text::{
    decode_base64, decode_hex, decode_payload_text, encode_base64, format_hex_compact,
    PayloadEncoding,
};
