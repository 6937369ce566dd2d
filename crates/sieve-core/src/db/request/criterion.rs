use crate::{db::request::Operator, value::RawValue};
use serde::{Deserialize, Serialize};

///
/// Criterion
///
/// One filter condition: a field path, an operator, and raw values.
///
/// `column` may name one field (`age`), sibling fields sharing the operator
/// (`name,nickname`), or a relationship path (`address.city,street`).
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Criterion {
    pub column: String,
    pub operator: Operator,
    #[serde(default)]
    pub values: Vec<RawValue>,
}

impl Criterion {
    pub fn new<I>(column: impl Into<String>, operator: Operator, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawValue>,
    {
        Self {
            column: column.into(),
            operator,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A criterion for an operator that takes no values.
    pub fn without_values(column: impl Into<String>, operator: Operator) -> Self {
        Self {
            column: column.into(),
            operator,
            values: Vec::new(),
        }
    }

    /// The value comparison operators read; extra values are ignored.
    #[must_use]
    pub fn first_value(&self) -> Option<&RawValue> {
        self.values.first()
    }
}
