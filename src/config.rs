//! Process configuration loaded from environment variables.

use std::env;

use chrono::FixedOffset;

use crate::formatter::{is_valid_pattern, StrftimeFormatter, DEFAULT_DATE_FORMAT};

/// Default values used when a variable is not set.
pub mod defaults {
    pub const DATE_FORMAT: &str = super::DEFAULT_DATE_FORMAT;
    pub const UTC_OFFSET_MINUTES: i32 = 0;
    pub const PRETTY: bool = false;
}

/// Largest accepted offset magnitude, in minutes (23:59).
const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Record formatting configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// chrono strftime pattern for the `timestamp` field
    pub date_format: String,
    /// Offset from UTC the timestamp is rendered in, in minutes
    pub utc_offset_minutes: i32,
    /// Indent JSON output (binary only)
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            date_format: defaults::DATE_FORMAT.to_string(),
            utc_offset_minutes: defaults::UTC_OFFSET_MINUTES,
            pretty: defaults::PRETTY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BUILD_RECORD_DATE_FORMAT`: strftime pattern (default: ISO 8601 with millis)
    /// - `BUILD_RECORD_UTC_OFFSET_MINUTES`: render offset in minutes (default: 0)
    /// - `BUILD_RECORD_PRETTY`: `true`/`false`, indent output (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let date_format = lookup("BUILD_RECORD_DATE_FORMAT")
            .unwrap_or_else(|| defaults::DATE_FORMAT.to_string());

        let utc_offset_minutes = match lookup("BUILD_RECORD_UTC_OFFSET_MINUTES") {
            Some(raw) => raw.trim().parse::<i32>().map_err(|_| {
                ConfigError::InvalidValue("BUILD_RECORD_UTC_OFFSET_MINUTES must be an integer")
            })?,
            None => defaults::UTC_OFFSET_MINUTES,
        };

        let pretty = match lookup("BUILD_RECORD_PRETTY") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue(
                "BUILD_RECORD_PRETTY must be 'true' or 'false'",
            ))?,
            None => defaults::PRETTY,
        };

        let config = Config {
            date_format,
            utc_offset_minutes,
            pretty,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate values that parsed but are out of range.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !is_valid_pattern(&self.date_format) {
            errors.push(format!(
                "BUILD_RECORD_DATE_FORMAT '{}' is not a valid strftime pattern",
                self.date_format
            ));
        }

        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&self.utc_offset_minutes) {
            errors.push(format!(
                "BUILD_RECORD_UTC_OFFSET_MINUTES {} is outside ±{}",
                self.utc_offset_minutes, MAX_OFFSET_MINUTES
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        Ok(())
    }

    /// Build the date formatter this configuration describes.
    pub fn formatter(&self) -> Result<StrftimeFormatter, ConfigError> {
        let offset = self
            .utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(ConfigError::InvalidValue(
                "BUILD_RECORD_UTC_OFFSET_MINUTES is out of range",
            ))?;
        StrftimeFormatter::new(self.date_format.clone(), offset).ok_or(ConfigError::InvalidValue(
            "BUILD_RECORD_DATE_FORMAT is not a valid strftime pattern",
        ))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}
