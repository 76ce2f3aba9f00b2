#![no_main]

use libfuzzer_sys::fuzz_target;
use lht65n_codec::payload::RECORD_LEN;
use lht65n_codec::{DecodeError, Lht65nDecoder};

fuzz_target!(|data: &[u8]| {
    let decoder = Lht65nDecoder::default();

    match decoder.decode_payload(data, 0) {
        Ok(uplink) => {
            assert!(!uplink.measurements.is_empty());
            // live uplinks are one reading, batches one per complete record
            assert!(
                uplink.measurements.len() == 1
                    || uplink.measurements.len() == data.len() / RECORD_LEN
            );
            for (i, m) in uplink.measurements.iter().enumerate() {
                assert_eq!(m.order as usize, i + 1);
            }
        }
        Err(DecodeError::MalformedPayload { actual, .. }) => assert_eq!(actual, data.len()),
        Err(err) => panic!("unexpected decode error: {err}"),
    }

    // flip the message flags to drive the same bytes down the other path
    if data.len() > 6 {
        let mut flipped = data.to_vec();
        flipped[6] ^= 0xC0;
        let _ = decoder.decode_payload(&flipped, 0);
    }
});
