//! Timestamps and their textual storage form.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp used for `created_at` / `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp as RFC 3339 with millisecond precision.
#[must_use]
pub fn to_text(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 string back into a UTC timestamp.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] if `text` is not valid RFC 3339.
pub fn from_text(text: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|ts| ts.with_timezone(&Utc))
}
