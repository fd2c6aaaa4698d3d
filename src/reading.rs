//! A single temperature reading.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed display format for reading timestamps (second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One sampled value and the instant it belongs to.
///
/// Readings are immutable once created; buffers and snapshots only ever copy
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    value: f64,
    timestamp: NaiveDateTime,
}

impl Reading {
    /// Creates a reading.
    #[must_use]
    pub fn new(value: f64, timestamp: NaiveDateTime) -> Self {
        Self { value, timestamp }
    }

    /// Temperature value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Timestamp of the reading.
    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`].
    #[must_use]
    pub fn timestamp_text(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
