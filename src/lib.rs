//! # lht65n-codec - A Rust Crate for Dragino LHT65N Uplink Decoding
//!
//! The lht65n-codec crate decodes the binary uplink payload of the Dragino LHT65N
//! temperature/humidity sensor (with optional DS18B20, TMP117 or PT100 probe)
//! into structured measurements and device status for a network application.
//!
//! ## Features
//!
//! - Classify live readings and datalog batches from the payload control byte
//! - Decode internal temperature/humidity, external probe temperature and battery status
//! - Parse poll and retransmission batches of 11-byte datalog records
//! - Resolve embedded datalog timestamps in seconds or milliseconds
//! - Report failures as an `errors` list instead of partial results
//! - Support for logging, configuration and hex/base64 payload input
//!
//! ## Usage
//!
//! ```rust
//! use lht65n_codec::{decode_uplink, UplinkInput};
//!
//! let input = UplinkInput::new(2, [0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, 0x01, 0x7F, 0xFF, 0x7F, 0xFF]);
//! let output = decode_uplink(&input);
//!
//! let measurement = &output.data.measurements()[0];
//! assert_eq!(measurement.internal_temperature_c, Some(26.09));
//! assert_eq!(measurement.external_temperature_c, None);
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod logging;
pub mod payload;
pub mod util;

pub use crate::config::DecoderConfig;
pub use crate::decoder::{decode_uplink, Lht65nDecoder, UplinkDecoder, UplinkInput, UplinkOutput};
pub use crate::error::{CodecError, DecodeError};
pub use crate::logging::{init_logger, log_error, log_info};

pub use payload::{
    BatteryReading, ControlByte, DecodeResult, DecodedUplink, DeviceInfo, ExternalSensor,
    Measurement, UplinkKind,
};
