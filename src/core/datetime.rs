//! Timestamp helpers for epoch-millisecond values.

use chrono::{DateTime, Local, TimeZone};

use crate::session::Millis;

/// Convert epoch milliseconds to local time.
#[must_use]
pub fn to_local(ms: Millis) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// Local calendar date label (`YYYY-MM-DD`) for a timestamp.
#[must_use]
pub fn date_label(ms: Millis) -> String {
    to_local(ms).map_or_else(String::new, |t| t.format("%Y-%m-%d").to_string())
}

/// Local wall-clock time (`HH:MM`) for a timestamp.
#[must_use]
pub fn time_label(ms: Millis) -> String {
    to_local(ms).map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
}

/// Local date and time (`YYYY-MM-DD HH:MM`) for a timestamp.
#[must_use]
pub fn date_time_label(ms: Millis) -> String {
    to_local(ms).map_or_else(String::new, |t| t.format("%Y-%m-%d %H:%M").to_string())
}
