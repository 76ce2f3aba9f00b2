//! # Decoder Configuration
//!
//! Loads decoder settings from a JSON file. `load_with_env_overrides` also applies:
//! - `LHT65N_MODEL`: device model reported in `decodedDeviceInfo`
//! - `LHT65N_DEVICE_TYPE`: device type reported in `decodedDeviceInfo`
//! - `LHT65N_UTC_OFFSET_MINUTES`: offset used for `measuredAtDisplay`

use crate::error::CodecError;
use chrono::format::{Item, StrftimeItems};
use chrono::FixedOffset;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MODEL: &str = "DRAGINO_LHT65N";
pub const DEFAULT_DEVICE_TYPE: &str = "STATIONARY";
pub const DEFAULT_DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Settings for [`crate::decoder::Lht65nDecoder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Model identifier reported for every uplink.
    pub model: String,
    /// Device type reported for every uplink.
    pub device_type: String,
    /// Offset from UTC, in minutes, for rendered timestamps.
    pub display_utc_offset_minutes: i32,
    /// `chrono` strftime pattern for rendered timestamps.
    pub display_format: String,
    /// Whether measurements carry `measuredAtDisplay`.
    pub include_display: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            device_type: DEFAULT_DEVICE_TYPE.to_string(),
            display_utc_offset_minutes: 0,
            display_format: DEFAULT_DISPLAY_FORMAT.to_string(),
            include_display: true,
        }
    }
}

impl DecoderConfig {
    /// Load and validate configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: DecoderConfig = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Loaded decoder configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a JSON file, then apply environment overrides.
    pub fn load_with_env_overrides(path: impl AsRef<Path>) -> Result<Self, CodecError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `LHT65N_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) -> Result<(), CodecError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), CodecError> {
        if let Some(model) = lookup("LHT65N_MODEL") {
            info!("Using LHT65N_MODEL from environment");
            self.model = model;
        }
        if let Some(device_type) = lookup("LHT65N_DEVICE_TYPE") {
            info!("Using LHT65N_DEVICE_TYPE from environment");
            self.device_type = device_type;
        }
        if let Some(offset) = lookup("LHT65N_UTC_OFFSET_MINUTES") {
            self.display_utc_offset_minutes = offset.trim().parse().map_err(|_| {
                CodecError::Config(format!("LHT65N_UTC_OFFSET_MINUTES is not an integer: {offset}"))
            })?;
        }

        self.validate()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.model.trim().is_empty() {
            return Err(CodecError::Config("model must not be empty".to_string()));
        }
        if self.display_utc_offset_minutes.abs() >= MAX_OFFSET_MINUTES {
            return Err(CodecError::Config(format!(
                "display_utc_offset_minutes {} is outside +/-{}",
                self.display_utc_offset_minutes, MAX_OFFSET_MINUTES
            )));
        }
        if StrftimeItems::new(&self.display_format).any(|item| matches!(item, Item::Error)) {
            return Err(CodecError::Config(format!(
                "display_format is not a valid strftime pattern: {}",
                self.display_format
            )));
        }
        Ok(())
    }

    /// The configured display offset.
    pub fn display_offset(&self) -> Result<FixedOffset, CodecError> {
        FixedOffset::east_opt(self.display_utc_offset_minutes * 60).ok_or_else(|| {
            CodecError::Config(format!(
                "invalid UTC offset: {} minutes",
                self.display_utc_offset_minutes
            ))
        })
    }
}
