//! Timestamp helpers.
//!
//! Records store creation times as UTC strings in `YYYY-MM-DD HH:MM:SS`
//! form; pages show them in the configured timezone.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Storage format for timestamps.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display format used on pages.
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Current UTC time in storage format.
pub fn now_timestamp() -> String {
    to_timestamp(&Utc::now())
}

/// Format a UTC datetime in storage format.
pub fn to_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

/// Format a stored timestamp in the given timezone.
///
/// Accepts storage format and RFC3339. Returns the input unchanged when
/// either the timestamp or the timezone cannot be parsed, so a damaged
/// side-record still renders.
pub fn format_timestamp(stored: &str, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return stored.to_string(),
    };

    let utc = if let Ok(naive) = NaiveDateTime::parse_from_str(stored, STORAGE_FORMAT) {
        naive.and_utc()
    } else if let Ok(dt) = DateTime::parse_from_rfc3339(stored) {
        dt.with_timezone(&Utc)
    } else {
        return stored.to_string();
    };

    utc.with_timezone(&tz).format(format).to_string()
}

/// Format a stored timestamp with [`DISPLAY_FORMAT`].
pub fn format_timestamp_default(stored: &str, timezone: &str) -> String {
    format_timestamp(stored, timezone, DISPLAY_FORMAT)
}
