use crate::value::Value;
use std::cmp::Ordering;

/// Strict ordering for identical value variants.
///
/// Returns `None` if values are of different variants or do not support
/// ordering.
#[must_use]
pub fn strict_ordering(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.ordinal.cmp(&b.ordinal)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
        (Value::Uuid(a), Value::Uuid(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => int_to_float(*a).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&int_to_float(*b)),
        _ => {
            // NOTE: Non-matching or non-orderable variants do not define ordering.
            None
        }
    }
}

/// Canonical total ordering used for ORDER BY.
///
/// NULL sorts after every non-null value; mismatched variants fall back to
/// a fixed variant rank so the result is always total.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    if let Some(ordering) = strict_ordering(left, right) {
        return ordering;
    }

    canonical_rank(left).cmp(&canonical_rank(right))
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Enum(_) => 1,
        Value::Float(_) | Value::Int(_) => 2,
        Value::List(_) => 3,
        Value::Text(_) => 4,
        Value::Timestamp(_) => 5,
        Value::Uuid(_) => 6,
        Value::Null => 7,
    }
}

#[expect(clippy::cast_precision_loss)]
const fn int_to_float(value: i64) -> f64 {
    value as f64
}
