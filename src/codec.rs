//! Value Codec
//!
//! Converts the raw string scalars found in Atom content into typed values.
//! Every function is pure; a value that cannot be converted is a
//! [`ApiError::Format`] error.

use crate::error::{ApiError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Layouts tried in order by [`to_date`] after RFC 3339.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%a %b %d %H:%M:%S %z %Y",
];

/// Layouts without an offset; interpreted as UTC.
const NAIVE_DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%a %b %d %H:%M:%S %Y",
];

const KB: i64 = 1024;
const MB: i64 = KB * 1024;
const GB: i64 = MB * 1024;

fn format_error(kind: &str, value: &str) -> ApiError {
    ApiError::Format(format!("Cannot convert '{}' to {}", value, kind))
}

/// `"0"`/`"1"` or case-insensitive `"true"`/`"false"`.
pub fn to_boolean(value: &str) -> Result<bool> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(format_error("boolean", value)),
    }
}

/// Integer with an optional `KB`/`MB`/`GB` suffix (powers of 1024).
pub fn to_byte_count(value: &str) -> Result<i64> {
    let (digits, multiplier) = if let Some(prefix) = value.strip_suffix("KB") {
        (prefix, KB)
    } else if let Some(prefix) = value.strip_suffix("MB") {
        (prefix, MB)
    } else if let Some(prefix) = value.strip_suffix("GB") {
        (prefix, GB)
    } else {
        (value, 1)
    };
    digits
        .parse::<i64>()
        .ok()
        .and_then(|count| count.checked_mul(multiplier))
        .ok_or_else(|| format_error("byte count", value))
}

/// Timestamp in one of the known layouts, falling back to epoch seconds.
pub fn to_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }
    for layout in DATE_LAYOUTS {
        if let Ok(date) = DateTime::parse_from_str(value, layout) {
            return Ok(date.with_timezone(&Utc));
        }
    }
    for layout in NAIVE_DATE_LAYOUTS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, layout) {
            return Ok(Utc.from_utc_datetime(&date));
        }
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .ok_or_else(|| format_error("date", value))
}

pub fn to_integer(value: &str) -> Result<i32> {
    value.parse().map_err(|_| format_error("integer", value))
}

pub fn to_long(value: &str) -> Result<i64> {
    value.parse().map_err(|_| format_error("long", value))
}

pub fn to_float(value: &str) -> Result<f64> {
    value.parse().map_err(|_| format_error("float", value))
}
