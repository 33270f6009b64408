use chrono::{DateTime, NaiveDateTime};

/// Last-resort pattern for near-RFC-1123 strings whose time zone name the
/// stricter parsers reject. `%Z` skips the zone token during parsing, so the
/// wall time is read as UTC.
const LOOSE_RFC1123: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Parses a feed timestamp into epoch seconds, trying a fixed format chain.
///
/// Attempts, in order:
///
/// 1. offset-qualified ISO-8601 / RFC 3339 (`2024-01-01T00:00:00+02:00`)
/// 2. RFC 2822 / RFC-1123-style with named zones (`Mon, 01 Jan 2024 00:00:00 GMT`)
/// 3. the loose RFC-1123 pattern above
///
/// The first success wins, normalized to UTC via the format's own offset.
/// `None` means no format matched; callers still emit the post, just without
/// a publication time. Callers check for blank input first.
pub fn parse_date(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.timestamp());
    }
    NaiveDateTime::parse_from_str(raw, LOOSE_RFC1123)
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}
