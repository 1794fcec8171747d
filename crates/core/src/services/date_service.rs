use chrono::{DateTime, FixedOffset};

use crate::models::settings::Settings;

/// Rendering used for timestamps outside chrono's representable range.
pub const INVALID_DATE: &str = "Invalid Date";

/// Renders epoch-millisecond timestamps in the display timezone.
///
/// Day keys (`3/14/2025`) group records per calendar day; date-times
/// (`3/14/2025, 2:05:09 PM`) label individual points.
#[derive(Debug, Clone, Copy)]
pub struct DateService {
    offset: FixedOffset,
}

impl DateService {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.display_offset())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar-day key for grouping.
    pub fn day_key(&self, timestamp_ms: i64) -> String {
        self.render(timestamp_ms, "%-m/%-d/%Y")
    }

    /// Human-readable date and time.
    pub fn date_time(&self, timestamp_ms: i64) -> String {
        self.render(timestamp_ms, "%-m/%-d/%Y, %-I:%M:%S %p")
    }

    fn render(&self, timestamp_ms: i64, fmt: &str) -> String {
        match DateTime::from_timestamp_millis(timestamp_ms) {
            Some(utc) => utc.with_timezone(&self.offset).format(fmt).to_string(),
            None => INVALID_DATE.to_string(),
        }
    }
}

impl Default for DateService {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
