//! Date and time utility functions
//!
//! This module provides the timestamp grammar shared by the loader and the
//! normalizer, the step-duration grammar used by the synthetic generator and
//! the canonical text rendering of date-time values.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Canonical rendering of date-time values (fractional seconds only when non-zero)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Date-time layouts tried in order after RFC 3339
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
];

/// Date-only layouts, interpreted as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

/// Parse a timestamp string into a zone-less date-time
///
/// # Arguments
/// * `value` - Timestamp text; surrounding whitespace is ignored
///
/// # Returns
/// * `Option<NaiveDateTime>` - Parsed value, or `None` if no layout matches
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // RFC3339 with an offset (e.g., "2025-01-15T14:30:00+02:00"); keep the wall clock
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Format a date-time in the canonical `YYYY-MM-DD HH:MM:SS` form
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a step duration such as `"14 hours"`, `"14h"`, `"30min"` or `"2 days"`
///
/// The magnitude defaults to 1 when omitted (`"h"` is one hour). A leading `-`
/// gives a backwards step (`"-14h"`). Units are case-insensitive. Zero-length
/// steps are rejected.
pub fn parse_step(step: &str) -> Result<Duration, String> {
    let step = step.trim();
    let (sign, unsigned) = match step.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, step.strip_prefix('+').unwrap_or(step)),
    };
    let digits_end = unsigned
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(unsigned.len());

    let (magnitude, unit) = unsigned.split_at(digits_end);
    let magnitude: i64 = if magnitude.is_empty() {
        1
    } else {
        magnitude
            .parse()
            .map_err(|e| format!("invalid step magnitude '{}': {}", magnitude, e))?
    };
    let magnitude = sign * magnitude;

    let unit = unit.trim().to_ascii_lowercase();
    let duration = match unit.as_str() {
        "w" | "week" | "weeks" => Duration::try_weeks(magnitude),
        "d" | "day" | "days" => Duration::try_days(magnitude),
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::try_hours(magnitude),
        "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(magnitude),
        "s" | "sec" | "secs" | "second" | "seconds" => Duration::try_seconds(magnitude),
        "ms" | "millisecond" | "milliseconds" => Duration::try_milliseconds(magnitude),
        "" => return Err(format!("step '{}' is missing a unit", step)),
        other => return Err(format!("unknown step unit '{}'", other)),
    }
    .ok_or_else(|| format!("step '{}' is out of range", step))?;

    if duration.is_zero() {
        return Err(format!("step '{}' must not be zero", step));
    }

    Ok(duration)
}
