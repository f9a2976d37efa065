//! Tolerant numeric readings for loosely-typed survey fields.
//!
//! Survey documents come from field tablets and drone exports, so a height
//! may arrive as `12.5`, `"12.5"`, `null` or not at all. Every numeric field
//! goes through [`read_float`] or [`read_count`], which report one of three
//! outcomes instead of failing.

use serde_json::Value;

/// Outcome of reading one numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    /// The field holds a usable number.
    Value(T),
    /// The field is missing, `null` or empty. Treated as zero.
    Absent,
    /// The field holds something that is not a number.
    Unparseable,
}

impl<T: Default> Reading<T> {
    /// Collapse `Absent` to zero. `None` means the field was unparseable
    /// and the check depending on it must be skipped.
    pub fn or_zero(self) -> Option<T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Absent => Some(T::default()),
            Reading::Unparseable => None,
        }
    }
}

/// Whether a JSON value counts as "nothing there".
///
/// `null`, `false`, zero and empty strings/arrays/objects are all blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Read a decimal measurement (meters, square meters).
pub fn read_float(value: Option<&Value>) -> Reading<f64> {
    let Some(value) = value.filter(|v| !is_blank(v)) else {
        return Reading::Absent;
    };
    match value {
        Value::Number(n) => n.as_f64().map_or(Reading::Unparseable, Reading::Value),
        Value::Bool(_) => Reading::Value(1.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_or(Reading::Unparseable, Reading::Value),
        _ => Reading::Unparseable,
    }
}

/// Read a whole-number count (floors).
///
/// Fractional numbers are truncated toward zero, but fractional *strings*
/// such as `"3.5"` are rejected.
pub fn read_count(value: Option<&Value>) -> Reading<i64> {
    let Some(value) = value.filter(|v| !is_blank(v)) else {
        return Reading::Absent;
    };
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Reading::Value(i),
            (None, Some(f)) if f.is_finite() => Reading::Value(f.trunc() as i64),
            _ => Reading::Unparseable,
        },
        Value::Bool(_) => Reading::Value(1),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_or(Reading::Unparseable, Reading::Value),
        _ => Reading::Unparseable,
    }
}

/// Round to two decimal places for reporting.
///
/// Exact halfway cases go to the even neighbour (`0.125` becomes `0.12`).
/// A value that only looks halfway after scaling, such as `2.675`, is
/// rounded by the side its exact binary value lies on.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / 100.0;
    }
    // Exact rounding error of the product.
    let error = value.mul_add(100.0, -scaled);
    let rounded = if error > 0.0 {
        scaled.ceil()
    } else if error < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    rounded / 100.0
}
