//! Dataset records and scalar text conversion

use serde_json::{Number, Value};

/// One dataset row: column name to scalar value, in document key order
///
/// No column is contractually fixed; roles are discovered by schema
/// inference from a sample record.
pub type Record = serde_json::Map<String, Value>;

/// String form of a cell, as every lookup sees it
///
/// - strings map to themselves (including the empty string)
/// - numbers map to their shortest decimal rendering (`3.0` renders as `3`)
/// - `true` maps to `"true"`
/// - `null`, `false`, nested arrays and objects, and missing cells map to `None`
#[must_use]
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether a cell carries usable content
///
/// Present, non-empty, and not the number zero.
#[must_use]
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        other => scalar_text(other).is_some_and(|s| !s.is_empty()),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}
