use serde_json::Value;

use crate::error::{WidgetError, WidgetResult};

// Largest magnitude that survives the f64 -> i64 cast unchanged.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Parse the value of a number widget.
///
/// Accepts JSON integers, floats (truncated toward zero) and numeric
/// strings. `null` and empty strings are "no value".
pub fn parse_integer_value(value: &Value) -> WidgetResult<Option<i64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(i))
            } else {
                n.as_f64()
                    .and_then(truncate_float)
                    .map(Some)
                    .ok_or_else(|| WidgetError::MalformedNumber(n.to_string()))
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(Some(i));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(truncate_float)
                .map(Some)
                .ok_or_else(|| WidgetError::MalformedNumber(s.clone()))
        }
        other => Err(WidgetError::MalformedNumber(other.to_string())),
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    if f.is_finite() && f.abs() <= MAX_EXACT_F64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Parse a spreadsheet cell as a number, allowing thousands separators.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
