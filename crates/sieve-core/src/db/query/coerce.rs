//! Value coercion from loosely-typed criterion values to column types.
//!
//! Only date, identifier, and enum columns are converted here; every other
//! kind passes through and the storage layer binds it natively.

use crate::{
    model::field::{CoercionKind, EnumModel, FieldKind},
    value::{RawValue, Value, ValueEnum},
};
use chrono::DateTime;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Length of the hyphenated UUID form, the only accepted spelling.
const CANONICAL_UUID_LEN: usize = 36;

///
/// CoerceError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CoerceError {
    #[error("'{raw}' is not an epoch-millisecond timestamp")]
    InvalidDate { raw: String },

    #[error("Invalid Enum Value '{raw}' for {enum_name}")]
    InvalidEnum { enum_name: &'static str, raw: String },

    #[error("'{raw}' is not a canonical UUID")]
    InvalidUuid { raw: String },
}

/// Coerce one raw value for a column of the given kind.
pub fn coerce(kind: FieldKind, raw: &RawValue) -> Result<Value, CoerceError> {
    match (kind.coercion(), kind) {
        (CoercionKind::Date, _) => coerce_date(raw),
        (CoercionKind::Identifier, _) => coerce_uuid(raw),
        (CoercionKind::Enum, FieldKind::Enum(model)) => coerce_enum(model, raw),
        _ => Ok(Value::from(raw.clone())),
    }
}

fn coerce_date(raw: &RawValue) -> Result<Value, CoerceError> {
    let invalid = || CoerceError::InvalidDate {
        raw: raw.to_string(),
    };

    let millis = match raw {
        RawValue::Int(millis) => *millis,
        RawValue::Text(text) => text.parse::<i64>().map_err(|_| invalid())?,
        RawValue::Bool(_) | RawValue::Float(_) => return Err(invalid()),
    };

    DateTime::from_timestamp_millis(millis)
        .map(Value::Timestamp)
        .ok_or_else(invalid)
}

fn coerce_uuid(raw: &RawValue) -> Result<Value, CoerceError> {
    let invalid = || CoerceError::InvalidUuid {
        raw: raw.to_string(),
    };

    let RawValue::Text(text) = raw else {
        return Err(invalid());
    };
    if text.len() != CANONICAL_UUID_LEN {
        return Err(invalid());
    }

    Uuid::parse_str(text).map(Value::Uuid).map_err(|_| invalid())
}

// First variant, in declaration order, whose name or exact decimal ordinal
// equals the raw display form.
fn coerce_enum(model: &'static EnumModel, raw: &RawValue) -> Result<Value, CoerceError> {
    let text = raw.to_string();

    (0u32..)
        .zip(model.variants)
        .find(|(ordinal, name)| **name == text || ordinal.to_string() == text)
        .map(|(ordinal, name)| Value::Enum(ValueEnum::new(ordinal, *name)))
        .ok_or(CoerceError::InvalidEnum {
            enum_name: model.name,
            raw: text,
        })
}
