//! # Decoded Uplink Records
//!
//! Output types of the decoder. Field names serialize in the camelCase shape
//! expected by network-server integrations.

use crate::payload::battery::BatteryReading;
use serde::{Deserialize, Serialize};

/// One temperature/humidity sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// External probe temperature in °C, `None` without a probe or on a probe fault.
    pub external_temperature_c: Option<f64>,
    /// Internal temperature in °C, `None` when the payload carries no internal data.
    pub internal_temperature_c: Option<f64>,
    /// Internal relative humidity in %.
    pub internal_humidity: Option<f64>,
    /// Milliseconds since the Unix epoch.
    pub measured_at: u64,
    /// `measured_at` rendered for display, if enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured_at_display: Option<String>,
    /// 1-based position within the uplink.
    pub order: u32,
}

/// Identity and battery state of the reporting device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model: String,
    #[serde(rename = "type")]
    pub device_type: String,
    /// Absent for poll responses, which carry no battery telemetry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<BatteryReading>,
}

/// A successfully decoded uplink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedUplink {
    pub measurements: Vec<Measurement>,
    pub decoded_device_info: DeviceInfo,
}

/// What the host receives under `data`: either the decoded uplink or the
/// diagnostics explaining why it could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodeResult {
    Decoded(DecodedUplink),
    Failed { errors: Vec<String> },
}

impl DecodeResult {
    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    pub fn measurements(&self) -> &[Measurement] {
        match self {
            Self::Decoded(uplink) => &uplink.measurements,
            Self::Failed { .. } => &[],
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Decoded(_) => &[],
            Self::Failed { errors } => errors,
        }
    }
}
