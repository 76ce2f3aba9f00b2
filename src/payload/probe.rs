//! External probe temperature with the firmware's fault sentinel resolved.

use crate::error::DecodeError;
use crate::payload::fields::{read_centi_celsius, read_unsigned_be16};

/// Word the firmware sends when a probe has no valid reading.
pub const FAULT_SENTINEL: u16 = 0x7FFF;

/// State of the external temperature field of a payload or record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeTemperature {
    /// A valid reading in degrees Celsius.
    Celsius(f64),
    /// The device reported the fault sentinel.
    Fault,
    /// No probe of a temperature-reporting type is configured.
    Absent,
}

impl ProbeTemperature {
    /// Returns `true` if the word at `offset` is the fault sentinel.
    pub fn is_fault(bytes: &[u8], offset: usize) -> Result<bool, DecodeError> {
        Ok(read_unsigned_be16(bytes, offset)? == FAULT_SENTINEL)
    }

    /// Reads the signed hundredths at `offset`, mapping the sentinel to [`Self::Fault`].
    pub fn read(bytes: &[u8], offset: usize) -> Result<Self, DecodeError> {
        if Self::is_fault(bytes, offset)? {
            return Ok(Self::Fault);
        }
        read_centi_celsius(bytes, offset).map(Self::Celsius)
    }

    pub fn celsius(&self) -> Option<f64> {
        match self {
            Self::Celsius(value) => Some(*value),
            Self::Fault | Self::Absent => None,
        }
    }
}
