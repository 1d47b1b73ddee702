//! Lenient numeric coercion for pricing fields read from untrusted JSON.
//!
//! Every pricing operation funnels its inputs through these helpers so that
//! absent, null, or garbage values collapse to the same defaults everywhere.

use serde_json::Value;

use crate::pricing::DEFAULT_CURRENCY;

/// Coerce a JSON value to a finite number.
///
/// Numbers pass through, numeric strings are parsed (blank strings are 0),
/// booleans map to 1/0 and everything else is 0. NaN and infinities are 0.
pub fn number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    finite(n)
}

/// Replace NaN and infinities with 0.
pub fn finite(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// A per-session rate. Missing or non-numeric rates are 0.
pub fn rate(value: &Value) -> f64 {
    number(value)
}

/// A session count, truncated toward zero.
///
/// A count that coerces to 0 becomes 1. Negative counts are kept as-is.
pub fn session_count(value: &Value) -> i64 {
    non_zero_sessions(number(value).trunc() as i64)
}

/// Floor a zero session count to a single session.
pub fn non_zero_sessions(sessions: i64) -> i64 {
    if sessions == 0 {
        1
    } else {
        sessions
    }
}

/// Optional numeric field: `None` when absent or null.
pub fn optional_number(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(number(v)),
    }
}

/// Currency code, falling back to GBP when missing, blank or not a string.
pub fn currency(value: &Value) -> String {
    match value {
        Value::String(s) => currency_code(s),
        _ => DEFAULT_CURRENCY.to_string(),
    }
}

pub fn currency_code(code: &str) -> String {
    if code.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        code.to_string()
    }
}

/// Borrow a JSON string; any other value is `None`.
pub fn optional_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Only an explicit JSON `true` counts as set.
pub fn flag(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}
