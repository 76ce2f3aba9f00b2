//! # Control Byte Classification
//!
//! Byte 6 of every LHT65N uplink selects the external probe type (low nibble)
//! and whether the payload is a live reading or a batch of datalog records
//! (bits 6 and 7). The byte is read once and governs the whole payload,
//! including every record of a batch.

use crate::error::DecodeError;
use crate::payload::fields::read_u8;
use bitflags::bitflags;
use std::fmt;

/// Offset of the control byte within the payload.
pub const CONTROL_BYTE_OFFSET: usize = 6;

bitflags! {
    /// Message-kind flags carried in the upper bits of the control byte.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MessageFlags: u8 {
        /// Response to a network-initiated poll, carrying datalog records.
        const POLL           = 0b0100_0000;
        /// Resend of buffered datalog records.
        const RETRANSMISSION = 0b1000_0000;
    }
}

/// External sensor mode from the low nibble of the control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalSensor {
    /// No external probe.
    None,
    /// DS18B20 temperature probe.
    Ds18b20,
    /// TMP117 temperature probe.
    Tmp117,
    /// External sensor connected (reserved).
    Connected,
    /// Resistive ADC / PT100 probe.
    AdcPt100,
    /// No internal sensor data in the payload.
    NoInternalSensor,
    /// Any other nibble value.
    Other(u8),
}

impl ExternalSensor {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x00 => Self::None,
            0x01 => Self::Ds18b20,
            0x02 => Self::Tmp117,
            0x04 => Self::Connected,
            0x09 => Self::AdcPt100,
            0x0F => Self::NoInternalSensor,
            other => Self::Other(other),
        }
    }

    pub fn nibble(&self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Ds18b20 => 0x01,
            Self::Tmp117 => 0x02,
            Self::Connected => 0x04,
            Self::AdcPt100 => 0x09,
            Self::NoInternalSensor => 0x0F,
            Self::Other(nibble) => *nibble,
        }
    }

    /// Probe types whose reading is a temperature in hundredths of a degree.
    pub fn reports_temperature(&self) -> bool {
        matches!(self, Self::Ds18b20 | Self::Tmp117 | Self::AdcPt100)
    }
}

impl fmt::Display for ExternalSensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Ds18b20 => write!(f, "DS18B20"),
            Self::Tmp117 => write!(f, "TMP117"),
            Self::Connected => write!(f, "external sensor connected"),
            Self::AdcPt100 => write!(f, "ADC/PT100"),
            Self::NoInternalSensor => write!(f, "no internal sensor"),
            Self::Other(nibble) => write!(f, "unknown (0x{nibble:X})"),
        }
    }
}

/// How the payload body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UplinkKind {
    /// One live measurement, timestamped on receipt.
    Live,
    /// A batch of 11-byte datalog records with embedded timestamps.
    Datalog,
}

/// The decoded control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlByte {
    raw: u8,
    pub external_sensor: ExternalSensor,
    pub flags: MessageFlags,
}

impl ControlByte {
    pub fn from_byte(raw: u8) -> Self {
        Self {
            raw,
            external_sensor: ExternalSensor::from_nibble(raw),
            flags: MessageFlags::from_bits_truncate(raw),
        }
    }

    /// Reads the control byte from a payload, which must be at least 7 bytes long.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() <= CONTROL_BYTE_OFFSET {
            return Err(DecodeError::MalformedPayload {
                expected: CONTROL_BYTE_OFFSET + 1,
                actual: bytes.len(),
            });
        }
        read_u8(bytes, CONTROL_BYTE_OFFSET).map(Self::from_byte)
    }

    pub fn raw(&self) -> u8 {
        self.raw
    }

    pub fn poll(&self) -> bool {
        self.flags.contains(MessageFlags::POLL)
    }

    pub fn retransmission(&self) -> bool {
        self.flags.contains(MessageFlags::RETRANSMISSION)
    }

    /// Returns `None` when the flags match neither layout.
    pub fn kind(&self) -> Option<UplinkKind> {
        if self.flags.is_empty() {
            Some(UplinkKind::Live)
        } else if self
            .flags
            .intersects(MessageFlags::POLL | MessageFlags::RETRANSMISSION)
        {
            Some(UplinkKind::Datalog)
        } else {
            None
        }
    }
}
