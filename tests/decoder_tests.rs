//! End-to-end tests for LHT65N uplink decoding.

use chrono::{TimeZone, Utc};
use lht65n_codec::util::decode_base64;
use lht65n_codec::{
    BatteryReading, DecodeResult, DecoderConfig, Lht65nDecoder, UplinkInput, UplinkOutput,
};
use serde_json::json;

const LIVE_DS18B20_PROBE_FAULT: &str = "zAgKMQIHAX//f/8=";
const RETRANSMISSION_BATCH: &str = "f/8KugH1gWlUTVt//wq6AfyBaVRNYn//Cr0B7IFpVE14f/8KvgHlgWlUTYJ//wq/AeGBaVRNkn//Cr8B4IFpVE2af/8KwQICgWlUTbB//wrEAh+BaVRNuw==";

fn decode(bytes: Vec<u8>) -> UplinkOutput {
    let received_at = Utc.with_ymd_and_hms(2025, 12, 30, 9, 31, 42).unwrap();
    Lht65nDecoder::default().decode_at(&UplinkInput::new(2, bytes), received_at)
}

fn decoded(output: &UplinkOutput) -> &lht65n_codec::DecodedUplink {
    match &output.data {
        DecodeResult::Decoded(uplink) => uplink,
        DecodeResult::Failed { errors } => panic!("unexpected errors: {errors:?}"),
    }
}

#[test]
fn test_golden_live_uplink() {
    let output = decode(decode_base64(LIVE_DS18B20_PROBE_FAULT).unwrap());
    let uplink = decoded(&output);

    assert_eq!(uplink.measurements.len(), 1);
    let m = &uplink.measurements[0];
    assert_eq!(m.order, 1);
    assert_eq!(m.external_temperature_c, None);
    assert_eq!(m.internal_temperature_c, Some(26.09));
    assert_eq!(m.internal_humidity, Some(51.9));
    assert_eq!(m.measured_at, 1_767_087_102_000);

    let info = &uplink.decoded_device_info;
    assert_eq!(info.model, "DRAGINO_LHT65N");
    assert_eq!(info.device_type, "STATIONARY");
    assert_eq!(
        info.battery,
        Some(BatteryReading {
            voltage: Some(3.08),
            raw: Some(3),
            percent: Some(100),
            label: Some("GOOD".to_string()),
        })
    );
}

#[test]
fn test_golden_retransmission_batch() {
    let bytes = decode_base64(RETRANSMISSION_BATCH).unwrap();
    assert_eq!(bytes.len(), 88);

    let output = decode(bytes);
    let uplink = decoded(&output);

    let expected = [
        (27.46, 50.1, 1_767_132_507u64),
        (27.46, 50.8, 1_767_132_514),
        (27.49, 49.2, 1_767_132_536),
        (27.50, 48.5, 1_767_132_546),
        (27.51, 48.1, 1_767_132_562),
        (27.51, 48.0, 1_767_132_570),
        (27.53, 51.4, 1_767_132_592),
        (27.56, 54.3, 1_767_132_603),
    ];
    assert_eq!(uplink.measurements.len(), expected.len());

    for (i, (m, (temperature, humidity, seconds))) in
        uplink.measurements.iter().zip(expected).enumerate()
    {
        assert_eq!(m.order as usize, i + 1);
        assert_eq!(m.external_temperature_c, None, "record {}", i + 1);
        assert_eq!(m.internal_temperature_c, Some(temperature));
        assert_eq!(m.internal_humidity, Some(humidity));
        assert_eq!(m.measured_at, seconds * 1000);
    }

    assert_eq!(
        uplink.decoded_device_info.battery,
        Some(BatteryReading::unknown())
    );
}

#[test]
fn test_live_uplink_without_probe() {
    let output = decode(vec![0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, 0x00, 0x09, 0x1A, 0x00, 0x00]);
    let m = &decoded(&output).measurements[0];
    assert_eq!(m.external_temperature_c, None);
    assert_eq!(m.internal_temperature_c, Some(26.09));
    assert_eq!(m.internal_humidity, Some(51.9));
}

#[test]
fn test_poll_batch_has_no_battery() {
    let mut bytes = vec![0x09, 0x1A, 0x0A, 0xBA, 0x01, 0xF5, 0x41];
    bytes.extend_from_slice(&1_767_132_507u32.to_be_bytes());

    let output = decode(bytes);
    let uplink = decoded(&output);
    assert_eq!(uplink.measurements[0].external_temperature_c, Some(23.3));
    assert_eq!(uplink.decoded_device_info.battery, None);
}

#[test]
fn test_twenty_byte_batch_yields_one_record() {
    let mut bytes = decode_base64(RETRANSMISSION_BATCH).unwrap();
    bytes.truncate(20);

    let output = decode(bytes);
    let uplink = decoded(&output);
    assert_eq!(uplink.measurements.len(), 1);
    assert_eq!(uplink.measurements[0].measured_at, 1_767_132_507_000);
}

#[test]
fn test_malformed_payloads_report_errors() {
    let output = decode(vec![0xCC, 0x08, 0x0A]);
    assert_eq!(
        output.data.errors(),
        ["malformed payload: expected at least 7 bytes, got 3".to_string()]
    );

    let output = decode(vec![0xCC, 0x08, 0x0A, 0x31, 0x02, 0x07, 0x01, 0x09]);
    assert_eq!(
        output.data.errors(),
        ["malformed payload: expected at least 11 bytes, got 8".to_string()]
    );

    let output = decode(vec![0x7F, 0xFF, 0x0A, 0xBA, 0x01, 0xF5, 0x81, 0x69]);
    assert!(!output.data.is_decoded());
    assert_eq!(output.data.errors().len(), 1);
}

#[test]
fn test_output_json_shape() {
    let output = decode(decode_base64(LIVE_DS18B20_PROBE_FAULT).unwrap());
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(
        value,
        json!({
            "data": {
                "measurements": [{
                    "externalTemperatureC": null,
                    "internalTemperatureC": 26.09,
                    "internalHumidity": 51.9,
                    "measuredAt": 1_767_087_102_000u64,
                    "measuredAtDisplay": "30.12.2025 09:31:42",
                    "order": 1
                }],
                "decodedDeviceInfo": {
                    "model": "DRAGINO_LHT65N",
                    "type": "STATIONARY",
                    "battery": {
                        "voltage": 3.08,
                        "raw": 3,
                        "percent": 100,
                        "label": "GOOD"
                    }
                }
            }
        })
    );
}

#[test]
fn test_chirpstack_input_envelope() {
    let input: UplinkInput = serde_json::from_value(json!({
        "fPort": 2,
        "bytes": [204, 8, 10, 49, 2, 7, 1, 127, 255, 127, 255],
        "variables": { "site": "greenhouse-3" }
    }))
    .unwrap();

    assert_eq!(input.f_port, 2);
    assert_eq!(input.bytes, decode_base64(LIVE_DS18B20_PROBE_FAULT).unwrap());
    assert_eq!(input.variables["site"], "greenhouse-3");
}

#[test]
fn test_display_offset_from_config() {
    let config = DecoderConfig {
        display_utc_offset_minutes: 180,
        ..DecoderConfig::default()
    };
    let decoder = Lht65nDecoder::new(config).unwrap();
    let uplink = decoder
        .decode_payload(&decode_base64(RETRANSMISSION_BATCH).unwrap(), 0)
        .unwrap();

    assert_eq!(
        uplink.measurements[0].measured_at_display.as_deref(),
        Some("31.12.2025 01:08:27")
    );
}
