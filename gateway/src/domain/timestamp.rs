//! Lenient timestamp parsing shared by search filters and result ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp in one of the accepted forms.
///
/// RFC 3339 values keep their offset; naive date-times and plain dates are
/// taken as UTC. Blank input yields `None`.
///
/// # Examples
/// ```
/// use gateway::domain::timestamp::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-01T00:00:00Z").is_some());
/// assert!(parse_timestamp("2024-01-01").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render a timestamp for upstream filter expressions.
///
/// Whole seconds render without a fraction; sub-second bounds keep their
/// millisecond, microsecond, or nanosecond digits.
#[must_use]
pub fn format_filter_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Render the provenance timestamp used when upstream supplies none.
#[must_use]
pub fn format_provenance_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}
