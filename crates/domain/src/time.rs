//! Time and timestamp helpers.

use chrono::NaiveDateTime;

/// Timestamp attached to measurements.
///
/// The store keeps wall-clock `YYYY-MM-DD HH:MM:SS` strings without a
/// timezone, so measurements use naive timestamps; day and hour bucketing
/// happens on the same clock the data was recorded on.
pub type Timestamp = NaiveDateTime;

const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a stored timestamp string, tolerating a `T` separator and
/// fractional seconds. Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
