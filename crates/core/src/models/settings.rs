use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::CoreError;

/// Number of records shown in the activity timeline by default.
pub const DEFAULT_TIMELINE_LEN: usize = 8;

/// Largest accepted display offset, in minutes (exclusive of a full day).
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Where transaction histories are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreSettings {
    /// Process-local store, empty at startup
    Memory,
    /// JSON export of the wallet collection on disk
    File(PathBuf),
    /// REST gateway in front of the document store
    Http(String),
}

/// Runtime settings for report generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Offset from UTC used to render dates and group days, in minutes.
    pub utc_offset_minutes: i32,

    /// How many of the most recent records the timeline keeps.
    pub timeline_len: usize,

    pub store: StoreSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            timeline_len: DEFAULT_TIMELINE_LEN,
            store: StoreSettings::Memory,
        }
    }
}

impl Settings {
    /// Load settings from process environment variables.
    ///
    /// - `INSIGHTS_UTC_OFFSET_MINUTES` display timezone (default 0)
    /// - `INSIGHTS_TIMELINE_LEN` timeline size (default 8)
    /// - `INSIGHTS_STORE_URL` use the HTTP store gateway
    /// - `INSIGHTS_STORE_FILE` use a JSON file store (when no URL is set)
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let utc_offset_minutes = match non_empty(lookup("INSIGHTS_UTC_OFFSET_MINUTES")) {
            Some(raw) => {
                let minutes: i32 = raw.parse().map_err(|_| {
                    CoreError::Config(format!(
                        "INSIGHTS_UTC_OFFSET_MINUTES must be an integer, got '{raw}'"
                    ))
                })?;
                if minutes.abs() > MAX_OFFSET_MINUTES {
                    return Err(CoreError::Config(format!(
                        "INSIGHTS_UTC_OFFSET_MINUTES out of range: {minutes} (expected -1439..1439)"
                    )));
                }
                minutes
            }
            None => defaults.utc_offset_minutes,
        };

        let timeline_len = match non_empty(lookup("INSIGHTS_TIMELINE_LEN")) {
            Some(raw) => raw.parse().map_err(|_| {
                CoreError::Config(format!(
                    "INSIGHTS_TIMELINE_LEN must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => defaults.timeline_len,
        };

        let store = match (
            non_empty(lookup("INSIGHTS_STORE_URL")),
            non_empty(lookup("INSIGHTS_STORE_FILE")),
        ) {
            (Some(url), _) => StoreSettings::Http(url),
            (None, Some(path)) => StoreSettings::File(PathBuf::from(path)),
            (None, None) => StoreSettings::Memory,
        };

        Ok(Self {
            utc_offset_minutes,
            timeline_len,
            store,
        })
    }

    /// The display timezone. Out-of-range offsets fall back to UTC.
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
