//! Loose conversions for JSON fields that arrive as either numbers or strings.

use crate::utils::constants::{DATETIME_FORMATS, DATE_FORMATS};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Coerce a JSON value to a station identifier.
///
/// Numbers truncate toward zero (`12.7` is station 12). Strings must hold an
/// integer (`" 12 "`, `"+12"`); `"12.0"` is rejected. Negative, boolean and
/// null values fail.
pub fn to_station_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                return u32::try_from(i).ok();
            }
            n.as_f64().and_then(truncated_u32)
        }
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn truncated_u32(f: f64) -> Option<u32> {
    let t = f.trunc();
    if t.is_finite() && t >= 0.0 && t <= u32::MAX as f64 {
        Some(t as u32)
    } else {
        None
    }
}

/// Coerce a JSON value to a finite measurement value.
pub fn to_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Stringify a pollutant code. `null` has no code.
pub fn to_code(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse a measurement date, ignoring any time-of-day component.
pub fn to_date(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}
