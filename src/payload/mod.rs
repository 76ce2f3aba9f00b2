//! The payload module contains the components responsible for decoding the
//! LHT65N uplink payload: field readers, control byte classification, battery
//! and timestamp helpers, and the live and datalog record decoders.

pub mod battery;
pub mod datalog;
pub mod fields;
pub mod header;
pub mod live;
pub mod probe;
pub mod record;
pub mod timestamp;

pub use battery::BatteryReading;
pub use datalog::{decode_datalog, parse_datalog_record, DatalogBatch, RECORD_LEN};
pub use header::{ControlByte, ExternalSensor, MessageFlags, UplinkKind};
pub use live::{decode_live, LiveUplink, LIVE_PAYLOAD_LEN};
pub use probe::ProbeTemperature;
pub use record::{DecodeResult, DecodedUplink, DeviceInfo, Measurement};
pub use timestamp::resolve_timestamp;
