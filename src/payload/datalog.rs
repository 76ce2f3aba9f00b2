//! # Datalog Batch Decoding
//!
//! Poll responses and retransmissions carry consecutive 11-byte datalog
//! records. Every record is interpreted with the control byte of the payload
//! as a whole; the byte at offset 6 of later records is not consulted.
//!
//! ```text
//! 0-1   external temperature, signed, /100, 0x7FFF = fault
//! 2-3   internal temperature, signed, /100
//! 4-5   internal humidity, 12 bits, /10
//! 6     status
//! 7-10  timestamp, seconds (or milliseconds) since the epoch
//! ```

use crate::error::DecodeError;
use crate::payload::battery::BatteryReading;
use crate::payload::fields::{read_centi_celsius, read_humidity, read_unsigned_be32};
use crate::payload::header::ControlByte;
use crate::payload::probe::ProbeTemperature;
use crate::payload::record::Measurement;
use crate::payload::timestamp::resolve_timestamp;
use log::{debug, warn};

/// Length of one datalog record.
pub const RECORD_LEN: usize = 11;

/// Result of decoding a datalog batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DatalogBatch {
    pub measurements: Vec<Measurement>,
    /// `Some(unknown)` for retransmissions, `None` for poll responses.
    pub battery: Option<BatteryReading>,
}

/// Parses one record. `record` must start at the record's first byte.
pub fn parse_datalog_record(
    record: &[u8],
    control: ControlByte,
    order: u32,
) -> Result<Measurement, DecodeError> {
    let probe = match ProbeTemperature::read(record, 0)? {
        ProbeTemperature::Celsius(_) if !control.external_sensor.reports_temperature() => {
            ProbeTemperature::Absent
        }
        probe => probe,
    };

    let timestamp = read_unsigned_be32(record, 7)?;

    Ok(Measurement {
        external_temperature_c: probe.celsius(),
        internal_temperature_c: Some(read_centi_celsius(record, 2)?),
        internal_humidity: Some(read_humidity(record, 4)?),
        measured_at: resolve_timestamp(u64::from(timestamp)),
        measured_at_display: None,
        order,
    })
}

/// Decodes every complete record in `bytes`. A trailing partial record is dropped.
pub fn decode_datalog(bytes: &[u8], control: ControlByte) -> Result<DatalogBatch, DecodeError> {
    if bytes.len() < RECORD_LEN {
        return Err(DecodeError::MalformedPayload {
            expected: RECORD_LEN,
            actual: bytes.len(),
        });
    }

    let records = bytes.chunks_exact(RECORD_LEN);
    let remainder = records.remainder().len();
    if remainder > 0 {
        warn!("Discarding {remainder} trailing bytes of incomplete datalog record");
    }

    let measurements = records
        .zip(1u32..)
        .map(|(record, order)| parse_datalog_record(record, control, order))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Datalog batch: {} records, poll={}, retransmission={}",
        measurements.len(),
        control.poll(),
        control.retransmission()
    );

    // resent history carries no live battery telemetry
    let battery = control.retransmission().then(BatteryReading::unknown);

    Ok(DatalogBatch {
        measurements,
        battery,
    })
}
