//! # Battery Status Decoding
//!
//! The LHT65N reports battery health as a 2-bit code in the top bits of a status
//! byte, and in most modes the remaining 14 bits of the same word carry the
//! battery voltage in millivolts.

use serde::{Deserialize, Serialize};

/// Labels for the 2-bit battery status code.
pub const BATTERY_LABELS: [&str; 4] = ["ULTRA LOW", "LOW", "OK", "GOOD"];

/// Battery information reported alongside an uplink.
///
/// All fields are `None` when the payload carries no battery telemetry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatteryReading {
    /// Battery voltage in volts.
    pub voltage: Option<f64>,
    /// Raw 2-bit status code (0-3).
    pub raw: Option<u8>,
    /// Approximate charge derived from `raw`: 0, 33, 67 or 100.
    pub percent: Option<u8>,
    /// Human-readable status.
    pub label: Option<String>,
}

impl BatteryReading {
    /// Battery reading with no information at all.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Builds a reading from an optional status byte and an optional voltage.
    ///
    /// Without a status byte only the voltage is passed through.
    pub fn decode(status: Option<u8>, voltage: Option<f64>) -> Self {
        let Some(status) = status else {
            return Self {
                voltage,
                ..Self::default()
            };
        };

        let raw = (status >> 6) & 0b11;
        let percent = (f64::from(raw) / 3.0 * 100.0).round() as u8;

        Self {
            voltage,
            raw: Some(raw),
            percent: Some(percent),
            label: BATTERY_LABELS.get(usize::from(raw)).map(|l| l.to_string()),
        }
    }

    /// Voltage from the low 14 bits of a big-endian millivolt word.
    pub fn voltage_from_word(word: u16) -> f64 {
        f64::from(word & 0x3FFF) / 1000.0
    }
}
