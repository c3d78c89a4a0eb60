//! Date formatting for record timestamps.
//!
//! The format is process configuration (see [`crate::config::Config`]); builders only
//! consume a formatter.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Default pattern: ISO 8601 with milliseconds and numeric offset.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Renders instants as record timestamp strings.
pub trait DateFormatter {
    fn format(&self, time: DateTime<Utc>) -> String;
}

/// strftime-pattern formatter rendering in a fixed UTC offset.
#[derive(Debug, Clone)]
pub struct StrftimeFormatter {
    pattern: String,
    offset: FixedOffset,
}

impl StrftimeFormatter {
    /// Create a formatter, rejecting patterns chrono cannot render.
    pub fn new(pattern: impl Into<String>, offset: FixedOffset) -> Option<Self> {
        let pattern = pattern.into();
        if !is_valid_pattern(&pattern) {
            return None;
        }
        Some(Self { pattern, offset })
    }
}

impl Default for StrftimeFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
            offset: Utc.fix(),
        }
    }
}

impl DateFormatter for StrftimeFormatter {
    fn format(&self, time: DateTime<Utc>) -> String {
        time.with_timezone(&self.offset)
            .format(&self.pattern)
            .to_string()
    }
}

/// Check that every item of a strftime pattern is understood by chrono.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !pattern.is_empty() && StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}
