//! Module: request
//! Responsibility: the wire-level filter request and its builder helpers.
//! Does not own: field resolution, coercion, or predicate compilation.
//! Boundary: callers build or deserialize a `FilterRequest` and hand it to
//! the executor; nothing here looks at an entity schema.

mod criterion;
mod operator;
mod sort;
mod validate;


use crate::{error::Error, value::RawValue};
use serde::{Deserialize, Serialize};

// re-exports
pub use criterion::Criterion;
pub use operator::{Operator, UnsupportedOperator};
pub use sort::{Sort, SortDirection};
pub use validate::{CriteriaGroup, ValidateError};

/// Convenience operand list for operators that take no values.
pub const NO_VALUES: [RawValue; 0] = [];

///
/// CriteriaOperator
/// Logical operator joining the AND-group and the OR-group.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CriteriaOperator {
    #[default]
    And,
    Or,
}

///
/// FilterRequest
///
/// Paging, sorting, and the two criteria groups for one query.
/// Built per query, mutated only through the chained helpers below,
/// and discarded once the query has run.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    /// Zero-based page index.
    pub page: u32,

    /// Page size; `<= 0` means unbounded.
    #[serde(default, alias = "pageSize")]
    pub size: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Sort>,

    /// Unset means the configured default (AND unless configured otherwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_operator: Option<CriteriaOperator>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<Criterion>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub or_criteria: Vec<Criterion>,
}

impl FilterRequest {
    #[must_use]
    pub fn new(page: u32, size: i32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    /// Decode a JSON request body. Unknown operator tokens fail here with
    /// `UnsupportedOperator`; any other malformed body is a validation error.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        serde_json::from_str(body).map_err(|err| match unsupported_operator(body) {
            Some(unsupported) => unsupported.into(),
            None => err.into(),
        })
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub const fn with_criteria_operator(mut self, operator: CriteriaOperator) -> Self {
        self.criteria_operator = Some(operator);
        self
    }

    /// Append one sort directive; earlier directives take priority.
    #[must_use]
    pub fn append_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push(Sort::new(column, direction));
        self
    }

    /// Append an ascending sort directive for each column, in order.
    #[must_use]
    pub fn append_sort_asc<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sort.extend(columns.into_iter().map(Sort::asc));
        self
    }

    /// Remove every sort directive on this column.
    #[must_use]
    pub fn remove_sort(mut self, column: &str) -> Self {
        self.sort.retain(|sort| sort.column != column);
        self
    }

    /// Append one criterion to the AND-group.
    #[must_use]
    pub fn append_criteria<I>(mut self, column: impl Into<String>, operator: Operator, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawValue>,
    {
        self.criteria.push(Criterion::new(column, operator, values));
        self
    }

    /// Remove every AND-group criterion on this column.
    #[must_use]
    pub fn remove_criteria(mut self, column: &str) -> Self {
        self.criteria.retain(|criterion| criterion.column != column);
        self
    }

    /// Append one criterion to the OR-group.
    #[must_use]
    pub fn append_or_criteria<I>(
        mut self,
        column: impl Into<String>,
        operator: Operator,
        values: I,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RawValue>,
    {
        self.or_criteria.push(Criterion::new(column, operator, values));
        self
    }

    /// Remove every OR-group criterion on this column.
    #[must_use]
    pub fn remove_or_criteria(mut self, column: &str) -> Self {
        self.or_criteria.retain(|criterion| criterion.column != column);
        self
    }

    /// Whether either criteria group carries anything.
    #[must_use]
    pub fn has_criteria(&self) -> bool {
        !self.criteria.is_empty() || !self.or_criteria.is_empty()
    }

    /// Page size with `<= 0` replaced by `max_page_size`.
    #[must_use]
    pub fn normalized_size(&self, max_page_size: u32) -> u32 {
        u32::try_from(self.size)
            .ok()
            .filter(|size| *size > 0)
            .map_or(max_page_size, |size| size.min(max_page_size))
    }
}

///
/// OperatorTokens
/// Operator tokens of a request body, read without resolving them.
///

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperatorTokens {
    #[serde(default)]
    criteria: Vec<OperatorToken>,

    #[serde(default)]
    or_criteria: Vec<OperatorToken>,
}

#[derive(Deserialize)]
struct OperatorToken {
    operator: String,
}

// First operator token in a body that names no operator.
fn unsupported_operator(body: &str) -> Option<UnsupportedOperator> {
    let tokens: OperatorTokens = serde_json::from_str(body).ok()?;

    tokens
        .criteria
        .iter()
        .chain(&tokens.or_criteria)
        .find_map(|criterion| Operator::from_token(&criterion.operator).err())
}
