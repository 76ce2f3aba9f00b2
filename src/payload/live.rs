//! # Live Uplink Decoding
//!
//! A live uplink (poll and retransmission flags clear) carries exactly one
//! reading and no timestamp; it is stamped with the receipt time.
//!
//! ```text
//! 0-1  battery status + voltage (ADC/PT100 mode: external temperature)
//! 2-3  internal temperature, signed, /100
//! 4-5  internal humidity, 12 bits, /10 (ADC/PT100 mode: byte 4 is battery status)
//! 6    control byte
//! 7-8  external temperature, signed, /100, 0x7FFF = fault
//! 9-10 reserved
//! ```

use crate::error::DecodeError;
use crate::payload::battery::BatteryReading;
use crate::payload::fields::{read_centi_celsius, read_humidity, read_u8, read_unsigned_be16};
use crate::payload::header::{ControlByte, ExternalSensor};
use crate::payload::probe::ProbeTemperature;
use crate::payload::record::Measurement;
use log::debug;

/// Length of a live uplink.
pub const LIVE_PAYLOAD_LEN: usize = 11;

/// Offset of the external temperature in the standard layout.
pub const EXTERNAL_TEMPERATURE_OFFSET: usize = 7;

/// Result of decoding a live uplink.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveUplink {
    pub measurement: Measurement,
    pub battery: BatteryReading,
}

/// Decodes a live uplink received at `received_at` (milliseconds since the epoch).
pub fn decode_live(
    bytes: &[u8],
    control: ControlByte,
    received_at: u64,
) -> Result<LiveUplink, DecodeError> {
    if bytes.len() < LIVE_PAYLOAD_LEN {
        return Err(DecodeError::MalformedPayload {
            expected: LIVE_PAYLOAD_LEN,
            actual: bytes.len(),
        });
    }

    let sensor = control.external_sensor;

    // ADC/PT100 moves the probe reading into the battery word
    let (adc_probe, battery) = if sensor == ExternalSensor::AdcPt100 {
        let probe = ProbeTemperature::read(bytes, 0)?;
        let battery = BatteryReading::decode(Some(read_u8(bytes, 4)?), None);
        (probe, battery)
    } else {
        let voltage = BatteryReading::voltage_from_word(read_unsigned_be16(bytes, 0)?);
        let battery = BatteryReading::decode(Some(read_u8(bytes, 0)?), Some(voltage));
        (ProbeTemperature::Absent, battery)
    };

    let (internal_temperature_c, internal_humidity) = if sensor == ExternalSensor::NoInternalSensor {
        (None, None)
    } else {
        (
            Some(read_centi_celsius(bytes, 2)?),
            Some(read_humidity(bytes, 4)?),
        )
    };

    let probe = match sensor {
        ExternalSensor::None => ProbeTemperature::Absent,
        _ if ProbeTemperature::is_fault(bytes, EXTERNAL_TEMPERATURE_OFFSET)? => {
            ProbeTemperature::Fault
        }
        ExternalSensor::Ds18b20 | ExternalSensor::Tmp117 => {
            ProbeTemperature::read(bytes, EXTERNAL_TEMPERATURE_OFFSET)?
        }
        _ => adc_probe,
    };

    debug!(
        "Live uplink: sensor={}, probe={:?}, battery={:?}",
        sensor, probe, battery.label
    );

    Ok(LiveUplink {
        measurement: Measurement {
            external_temperature_c: probe.celsius(),
            internal_temperature_c,
            internal_humidity,
            measured_at: received_at,
            measured_at_display: None,
            order: 1,
        },
        battery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIVED_AT: u64 = 1_767_087_102_973;

    fn decode(bytes: &[u8]) -> LiveUplink {
        decode_live(bytes, ControlByte::parse(bytes).unwrap(), RECEIVED_AT).unwrap()
    }

    #[test]
    fn test_ds18b20_reading() {
        let uplink = decode(&[0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, 0x01, 0x09, 0x1A, 0x7F, 0xFF]);
        let m = &uplink.measurement;
        assert_eq!(m.external_temperature_c, Some(23.30));
        assert_eq!(m.internal_temperature_c, Some(26.09));
        assert_eq!(m.internal_humidity, Some(51.9));
        assert_eq!(m.measured_at, RECEIVED_AT);
        assert_eq!(m.order, 1);
        assert_eq!(uplink.battery.voltage, Some(3.08));
        assert_eq!(uplink.battery.label.as_deref(), Some("GOOD"));
    }

    #[test]
    fn test_probe_fault() {
        let uplink = decode(&[0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, 0x02, 0x7F, 0xFF, 0x7F, 0xFF]);
        assert_eq!(uplink.measurement.external_temperature_c, None);
        assert_eq!(uplink.measurement.internal_temperature_c, Some(26.09));
    }

    #[test]
    fn test_no_probe_ignores_external_bytes() {
        let uplink = decode(&[0x8B, 0xB8, 0xFF, 0x38, 0x01, 0xF4, 0x00, 0x09, 0x1A, 0x00, 0x00]);
        let m = &uplink.measurement;
        assert_eq!(m.external_temperature_c, None);
        assert_eq!(m.internal_temperature_c, Some(-2.0));
        assert_eq!(m.internal_humidity, Some(50.0));
        assert_eq!(uplink.battery.voltage, Some(3.0));
        assert_eq!(uplink.battery.percent, Some(67));
    }

    #[test]
    fn test_adc_pt100_layout() {
        // probe -12.50 in bytes 0-1, battery status LOW in byte 4
        let uplink = decode(&[0xFB, 0x1E, 0x0A, 0x31, 0x42, 0x07, 0x09, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(uplink.measurement.external_temperature_c, Some(-12.5));
        assert_eq!(uplink.battery.voltage, None);
        assert_eq!(uplink.battery.raw, Some(1));
        assert_eq!(uplink.battery.label.as_deref(), Some("LOW"));
    }

    #[test]
    fn test_adc_pt100_with_fault_word() {
        let uplink = decode(&[0x7F, 0xFF, 0x0A, 0x31, 0xC2, 0x07, 0x09, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(uplink.measurement.external_temperature_c, None);

        let uplink = decode(&[0x04, 0xD2, 0x0A, 0x31, 0xC2, 0x07, 0x09, 0x7F, 0xFF, 0x00, 0x00]);
        assert_eq!(uplink.measurement.external_temperature_c, None);
    }

    #[test]
    fn test_modes_without_temperature_ignore_external_bytes() {
        for control in [0x04, 0x07] {
            let uplink = decode(&[0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, control, 0x09, 0x1A, 0x00, 0x00]);
            assert_eq!(uplink.measurement.external_temperature_c, None, "mode {control:#04x}");
            assert_eq!(uplink.measurement.internal_temperature_c, Some(26.09));
            assert_eq!(uplink.battery.voltage, Some(3.08));
        }
    }

    #[test]
    fn test_no_internal_sensor() {
        let uplink = decode(&[0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, 0x0F, 0x09, 0x1A, 0x00, 0x00]);
        assert_eq!(uplink.measurement.internal_temperature_c, None);
        assert_eq!(uplink.measurement.internal_humidity, None);
        assert_eq!(uplink.measurement.external_temperature_c, None);
    }

    #[test]
    fn test_short_live_payload() {
        let bytes = [0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, 0x01, 0x09];
        let control = ControlByte::parse(&bytes).unwrap();
        assert_eq!(
            decode_live(&bytes, control, RECEIVED_AT),
            Err(DecodeError::MalformedPayload {
                expected: 11,
                actual: 8
            })
        );
    }
}
