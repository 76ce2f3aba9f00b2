//! # Datalog Timestamp Resolution
//!
//! Firmware generations disagree on whether the embedded datalog timestamp is
//! in seconds or milliseconds since the Unix epoch. Values above
//! [`MILLIS_THRESHOLD`] are taken as milliseconds, everything else as seconds.

use chrono::{DateTime, FixedOffset};
use std::fmt::Write;

/// Largest raw value interpreted as seconds (around year 2286).
pub const MILLIS_THRESHOLD: u64 = 9_999_999_999;

/// Converts a raw device timestamp to milliseconds since the Unix epoch.
///
/// The datalog field is 32 bits wide, so the milliseconds branch is only taken
/// for wider values supplied by other callers.
pub fn resolve_timestamp(raw: u64) -> u64 {
    if raw > MILLIS_THRESHOLD {
        raw
    } else {
        raw * 1000
    }
}

/// Renders milliseconds since the epoch at a fixed UTC offset using a
/// `chrono` strftime pattern. Returns `None` for instants chrono cannot represent
/// and for patterns chrono rejects.
pub fn format_millis(millis: u64, offset: FixedOffset, pattern: &str) -> Option<String> {
    let millis = i64::try_from(millis).ok()?;
    let utc = DateTime::from_timestamp_millis(millis)?;

    let mut rendered = String::new();
    write!(rendered, "{}", utc.with_timezone(&offset).format(pattern)).ok()?;
    Some(rendered)
}
