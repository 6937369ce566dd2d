mod compare;
mod raw;

#[cfg(test)]
mod tests;

use chrono::{DateTime, SecondsFormat, Utc};
use derive_more::Display;
use std::fmt;
use uuid::Uuid;

// re-exports
pub use compare::{canonical_cmp, strict_ordering};
pub use raw::RawValue;

///
/// Value
///
/// Typed runtime value: what columns hold and what compiled predicates
/// compare against.
///
/// Null  → the column holds SQL NULL.
/// List  → many-cardinality operand (IN sets); never a column value.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Enum(ValueEnum),
    Float(f64),
    Int(i64),
    List(Vec<Self>),
    Null,
    Text(String),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text rendering used when a column is read "as string" (LIKE operands).
    ///
    /// Returns `None` for NULL; lists have no string form.
    #[must_use]
    pub fn render_text(&self) -> Option<String> {
        match self {
            Self::Bool(value) => Some(value.to_string()),
            Self::Enum(value) => Some(value.name.clone()),
            Self::Float(value) => Some(value.to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Text(value) => Some(value.clone()),
            Self::Timestamp(value) => Some(value.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Uuid(value) => Some(value.hyphenated().to_string()),
            Self::List(_) | Self::Null => None,
        }
    }

    /// Short variant label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Enum(_) => "enum",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::List(_) => "list",
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::Uuid(_) => "uuid",
        }
    }

    /// Build a list value from values, collapsing duplicates and keeping
    /// first-seen order.
    #[must_use]
    pub fn unique_list(values: impl IntoIterator<Item = Self>) -> Self {
        let mut unique: Vec<Self> = Vec::new();
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }

        Self::List(unique)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Null => f.write_str("null"),
            Self::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Self::Enum(value) => write!(f, "{value}"),
            other => match other.render_text() {
                Some(text) => f.write_str(&text),
                None => f.write_str("?"),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<RawValue> for Value {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Bool(value) => Self::Bool(value),
            RawValue::Float(value) => Self::Float(value),
            RawValue::Int(value) => Self::Int(value),
            RawValue::Text(value) => Self::Text(value),
        }
    }
}

///
/// ValueEnum
/// An enumeration member: its ordinal position and symbolic name.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{name}")]
pub struct ValueEnum {
    pub ordinal: u32,
    pub name: String,
}

impl ValueEnum {
    #[must_use]
    pub fn new(ordinal: u32, name: impl Into<String>) -> Self {
        Self {
            ordinal,
            name: name.into(),
        }
    }
}
