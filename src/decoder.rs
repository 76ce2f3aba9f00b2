//! LHT65N uplink decoder
//!
//! Entry point used by a host ingestion pipeline: it receives the port, the raw
//! payload and an opaque variable map, and returns either the decoded
//! measurements or a list of diagnostics. Decoding is stateless; a decoder value
//! only holds its configuration and can be shared between threads.

use crate::config::DecoderConfig;
use crate::error::{CodecError, DecodeError};
use crate::payload::header::{ControlByte, UplinkKind};
use crate::payload::record::{DecodeResult, DecodedUplink, DeviceInfo};
use crate::payload::timestamp::format_millis;
use crate::payload::{decode_datalog, decode_live};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Uplink as handed over by the network server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UplinkInput {
    /// LoRaWAN application port.
    #[serde(rename = "fPort", default)]
    pub f_port: u8,
    /// Raw application payload.
    pub bytes: Vec<u8>,
    /// Device variables configured on the network server; not interpreted.
    #[serde(default)]
    pub variables: HashMap<String, serde_json::Value>,
}

impl UplinkInput {
    pub fn new(f_port: u8, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            f_port,
            bytes: bytes.into(),
            variables: HashMap::new(),
        }
    }
}

/// Decoder output, serialized as `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UplinkOutput {
    pub data: DecodeResult,
}

/// Trait for payload decoders that can be plugged into an ingestion pipeline.
pub trait UplinkDecoder: Send + Sync + std::fmt::Debug {
    /// Decode an uplink received now.
    fn decode(&self, input: &UplinkInput) -> UplinkOutput;

    /// Get the name/type of this decoder
    fn decoder_type(&self) -> &str;
}

/// Decoder for Dragino LHT65N temperature/humidity sensors.
#[derive(Debug, Clone)]
pub struct Lht65nDecoder {
    config: DecoderConfig,
    display_offset: FixedOffset,
}

impl Default for Lht65nDecoder {
    fn default() -> Self {
        Self {
            config: DecoderConfig::default(),
            display_offset: Utc.fix(),
        }
    }
}

impl Lht65nDecoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Result<Self, CodecError> {
        config.validate()?;
        let display_offset = config.display_offset()?;
        Ok(Self {
            config,
            display_offset,
        })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode an uplink, stamping live readings with `received_at`.
    pub fn decode_at(&self, input: &UplinkInput, received_at: DateTime<Utc>) -> UplinkOutput {
        let received_at = match u64::try_from(received_at.timestamp_millis()) {
            Ok(millis) => millis,
            Err(_) => {
                warn!("Receipt time {received_at} precedes the Unix epoch, stamping live readings at 0");
                0
            }
        };

        let data = match self.decode_payload(&input.bytes, received_at) {
            Ok(uplink) => DecodeResult::Decoded(uplink),
            Err(err) => {
                warn!(
                    "Failed to decode {}-byte uplink on port {}: {}",
                    input.bytes.len(),
                    input.f_port,
                    err
                );
                DecodeResult::Failed {
                    errors: vec![err.to_string()],
                }
            }
        };

        UplinkOutput { data }
    }

    /// Decode a raw payload. `received_at` is in milliseconds since the epoch.
    pub fn decode_payload(
        &self,
        bytes: &[u8],
        received_at: u64,
    ) -> Result<DecodedUplink, DecodeError> {
        let control = ControlByte::parse(bytes)?;
        let kind = control
            .kind()
            .ok_or(DecodeError::UnknownMode(control.raw()))?;

        debug!(
            "Control byte 0x{:02X}: kind={:?}, sensor={}",
            control.raw(),
            kind,
            control.external_sensor
        );

        let (mut measurements, battery) = match kind {
            UplinkKind::Live => {
                let live = decode_live(bytes, control, received_at)?;
                (vec![live.measurement], Some(live.battery))
            }
            UplinkKind::Datalog => {
                let batch = decode_datalog(bytes, control)?;
                (batch.measurements, batch.battery)
            }
        };

        if self.config.include_display {
            for measurement in &mut measurements {
                measurement.measured_at_display = format_millis(
                    measurement.measured_at,
                    self.display_offset,
                    &self.config.display_format,
                );
            }
        }

        Ok(DecodedUplink {
            measurements,
            decoded_device_info: DeviceInfo {
                model: self.config.model.clone(),
                device_type: self.config.device_type.clone(),
                battery,
            },
        })
    }
}

impl UplinkDecoder for Lht65nDecoder {
    fn decode(&self, input: &UplinkInput) -> UplinkOutput {
        self.decode_at(input, Utc::now())
    }

    fn decoder_type(&self) -> &str {
        "DraginoLht65n"
    }
}

/// Decode an uplink with the default configuration.
pub fn decode_uplink(input: &UplinkInput) -> UplinkOutput {
    Lht65nDecoder::default().decode(input)
}
