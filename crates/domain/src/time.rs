//! Timestamp parsing and chart axis labels.

use chrono::{DateTime, Local, NaiveDateTime};

/// Label used for timestamps that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Naive layouts the backend is known to emit (its CSV logger writes the first).
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a backend timestamp into local wall-clock time.
///
/// Offset-aware RFC 3339 values are converted to the local zone; naive values
/// are taken as already local.
#[must_use]
pub fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
}

/// Short month/day/time label used on chart x-axes, e.g. `Oct 16, 02:30 PM`.
#[must_use]
pub fn short_label(raw: &str) -> String {
    parse_local(raw).map_or_else(
        || INVALID_DATE.to_string(),
        |dt| dt.format("%b %-d, %I:%M %p").to_string(),
    )
}
