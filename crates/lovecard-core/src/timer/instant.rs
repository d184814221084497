//! Instant parsing and wall-clock helpers.
//!
//! All instants are local wall-clock `NaiveDateTime`s; no timezone handling
//! beyond converting RFC 3339 input to local time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-like date-time string.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, the same with a space separator,
/// a bare `YYYY-MM-DD` (midnight), or a full RFC 3339 timestamp.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Parse `raw`, substituting `now` when it is absent or malformed.
pub fn instant_or_now(raw: Option<&str>, now: NaiveDateTime) -> NaiveDateTime {
    match raw {
        Some(value) => parse_instant(value).unwrap_or_else(|| {
            tracing::debug!(value, "unparsable instant, falling back to now");
            now
        }),
        None => now,
    }
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Zero-pad to two digits. Wider values are left intact.
pub fn pad2(value: i64) -> String {
    format!("{value:02}")
}
