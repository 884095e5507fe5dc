use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a departure timestamp from a request body.
///
/// Accepts RFC 3339 as well as the offset-less shapes an HTML
/// `datetime-local` input submits; offset-less values are taken as UTC.
pub fn parse_departure(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}
