//! Conversions shared by the decoder and the encoder: loose scalar coercion,
//! JSON text in both directions, and date-time parsing and formatting.

// used for timestamps and dates
use chrono::{DateTime, NaiveDate, NaiveDateTime};
// used for the object, array/json and collection casts
use serde_json::{Number, Value as JsonValue};
// so numeric prefixes can be found in text
use lazy_static::lazy_static;
use regex::Regex;

use std::fmt::Write;
use std::str::FromStr;

use tracing::warn;

use crate::error::{CastError, Result};
use crate::value::{LogicalValue, RawValue};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

lazy_static! {
    static ref NUMERIC_PREFIX: Regex =
        Regex::new(r"^\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
    static ref INTEGER_TEXT: Regex = Regex::new(r"^\s*[+-]?\d+\s*$").unwrap();
}

// ------------- Scalars -------------
fn numeric_prefix(text: &str) -> Option<&str> {
    NUMERIC_PREFIX
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Integer coercion. Reals truncate toward zero, text contributes its leading
/// number (or zero when there is none).
pub fn to_integer(raw: &RawValue) -> i64 {
    match raw {
        RawValue::Null => 0,
        RawValue::Integer(i) => *i,
        RawValue::Real(r) => *r as i64,
        RawValue::Boolean(b) => *b as i64,
        RawValue::Text(s) => match numeric_prefix(s) {
            Some(number) => number
                .parse::<i64>()
                .unwrap_or_else(|_| number.parse::<f64>().map_or(0, |f| f as i64)),
            None => 0,
        },
    }
}

pub fn to_float(raw: &RawValue) -> f64 {
    match raw {
        RawValue::Null => 0.0,
        RawValue::Integer(i) => *i as f64,
        RawValue::Real(r) => *r,
        RawValue::Boolean(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        RawValue::Text(s) => numeric_prefix(s)
            .and_then(|number| number.parse::<f64>().ok())
            .unwrap_or(0.0),
    }
}

pub fn to_boolean(raw: &RawValue) -> bool {
    match raw {
        RawValue::Null => false,
        RawValue::Integer(i) => *i != 0,
        RawValue::Real(r) => *r != 0.0,
        RawValue::Boolean(b) => *b,
        RawValue::Text(s) => !(s.is_empty() || s == "0"),
    }
}

// ------------- JSON -------------
/// Parses raw text as JSON. Text that is not JSON decodes to JSON null, the
/// same leniency the attribute store has always had.
pub fn decode_json(raw: &RawValue) -> JsonValue {
    let text = raw.to_text();
    match serde_json::from_str::<JsonValue>(&text) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "attribute does not hold valid JSON, decoding as null");
            JsonValue::Null
        }
    }
}

/// JSON decode into a logical value, as an `object` cast when `as_object` is
/// set and as an `array` cast otherwise.
pub fn from_json(raw: &RawValue, as_object: bool) -> LogicalValue {
    let json = decode_json(raw);
    if as_object {
        LogicalValue::Object(json)
    } else {
        LogicalValue::Json(json)
    }
}

pub fn to_json_value(value: &LogicalValue, date_format: &str) -> Result<JsonValue> {
    Ok(match value {
        LogicalValue::Null => JsonValue::Null,
        LogicalValue::Integer(i) => JsonValue::from(*i),
        LogicalValue::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or_else(|| CastError::Json(format!("{} has no JSON representation", f)))?,
        LogicalValue::String(s) => JsonValue::String(s.clone()),
        LogicalValue::Boolean(b) => JsonValue::Bool(*b),
        LogicalValue::Object(j) | LogicalValue::Json(j) => j.clone(),
        LogicalValue::Collection(c) => c.as_json().clone(),
        LogicalValue::DateTime(d) => JsonValue::String(format_date_time(d, date_format)?),
        LogicalValue::Custom(c) => {
            let text = c.encode_text()?;
            serde_json::from_str(&text).unwrap_or(JsonValue::String(text))
        }
    })
}

pub fn as_json(value: &LogicalValue, date_format: &str) -> Result<String> {
    let json = to_json_value(value, date_format)?;
    serde_json::to_string(&json).map_err(|e| CastError::Json(e.to_string()))
}

// ------------- Date and time -------------
pub fn from_timestamp(seconds: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0)
        .map(|d| d.naive_utc())
        .ok_or_else(|| CastError::DateTime(format!("timestamp {} is out of range", seconds)))
}

pub fn timestamp_of(moment: &NaiveDateTime) -> i64 {
    moment.and_utc().timestamp()
}

/// Accepts, in order: epoch seconds, a plain `Y-m-d` date (at midnight), the
/// storage format, RFC 3339, and ISO 8601 without offset.
pub fn parse_date_time(text: &str, date_format: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    if INTEGER_TEXT.is_match(text) {
        let seconds = text
            .parse::<i64>()
            .map_err(|e| CastError::DateTime(format!("'{}': {}", text, e)))?;
        return from_timestamp(seconds);
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight);
        }
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(text, date_format) {
        return Ok(moment);
    }
    if let Ok(moment) = DateTime::parse_from_rfc3339(text) {
        return Ok(moment.naive_utc());
    }
    NaiveDateTime::from_str(text)
        .map_err(|e| CastError::DateTime(format!("'{}' is not a recognized date: {}", text, e)))
}

pub fn format_date_time(moment: &NaiveDateTime, date_format: &str) -> Result<String> {
    let mut formatted = String::new();
    write!(formatted, "{}", moment.format(date_format)).map_err(|_| {
        CastError::DateTime(format!("'{}' is not a valid date format", date_format))
    })?;
    Ok(formatted)
}

pub fn as_date_time(raw: &RawValue, date_format: &str) -> Result<NaiveDateTime> {
    match raw {
        RawValue::Integer(i) => from_timestamp(*i),
        RawValue::Real(r) => from_timestamp(*r as i64),
        RawValue::Text(s) => parse_date_time(s, date_format),
        other => Err(CastError::DateTime(format!(
            "a {} value cannot be read as a date",
            other.type_name()
        ))),
    }
}

/// Epoch seconds become a date-time directly; anything else goes through
/// [`as_date_time`].
pub fn as_timestamp(raw: &RawValue, date_format: &str) -> Result<NaiveDateTime> {
    match raw {
        RawValue::Text(s) if numeric_prefix(s).is_some_and(|n| n.len() == s.len()) => {
            from_timestamp(to_integer(raw))
        }
        RawValue::Boolean(_) => from_timestamp(to_integer(raw)),
        other => as_date_time(other, date_format),
    }
}

/// Date-time view of a value being written to a date attribute.
pub fn logical_as_date_time(value: &LogicalValue, date_format: &str) -> Result<NaiveDateTime> {
    match value {
        LogicalValue::DateTime(d) => Ok(*d),
        LogicalValue::Integer(i) => from_timestamp(*i),
        LogicalValue::Float(f) => from_timestamp(*f as i64),
        LogicalValue::String(s) => parse_date_time(s, date_format),
        other => Err(CastError::DateTime(format!(
            "a {} value cannot be read as a date",
            other.type_name()
        ))),
    }
}

/// Storage form of a date attribute.
pub fn from_date_time(value: &LogicalValue, date_format: &str) -> Result<String> {
    format_date_time(&logical_as_date_time(value, date_format)?, date_format)
}
