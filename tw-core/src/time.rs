//! Timestamp parsing and formatting helpers.
//!
//! Timestamps are kept as wall-clock [`NaiveDateTime`] values. An RFC 3339
//! offset, when present, is dropped rather than converted, so the date and
//! hour of a record are exactly what the producer wrote.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date format used for day bucket keys: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of a forecast hour label: "HH:MM"
pub const HOUR_FORMAT: &str = "%H:%M";

/// Naive formats accepted after RFC 3339 has been tried.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO 8601 timestamp, returning `None` if no accepted form matches.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Format a NaiveDate as "YYYY-MM-DD"
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format the hour and minute of a timestamp as "HH:MM"
pub fn format_hour(ts: &NaiveDateTime) -> String {
    ts.format(HOUR_FORMAT).to_string()
}
