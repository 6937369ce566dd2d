//! Module: query::compile
//! Responsibility: one criterion + query context → one predicate.
//! Does not own: combining criteria (see `specification`) or execution.
//! Boundary: every failure is a `CompileError`; the whole criterion fails
//! on the first error.

mod path;
mod pattern;


use crate::{
    db::{
        query::{
            coerce::{CoerceError, coerce},
            context::QueryContext,
            predicate::{CompareOp, FieldRef, Predicate, Source},
        },
        request::{Criterion, Operator},
    },
    value::{RawValue, Value},
};
use path::FieldPath;
use pattern::{contains_pattern, wildcard_pattern};
use thiserror::Error as ThisError;
use tracing::debug;

/// Escape character used when no configuration is supplied.
pub const DEFAULT_ESCAPE: char = '\\';

///
/// CompileError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("invalid field path '{path}'")]
    InvalidPath { path: String },

    #[error("invalid value for field '{field}': {source}")]
    InvalidValue {
        field: String,
        #[source]
        source: CoerceError,
    },

    #[error("operator '{operator}' on '{column}' requires at least one value")]
    MissingValue { column: String, operator: Operator },

    #[error("unknown field '{field}' on entity '{entity}'")]
    UnknownField { entity: &'static str, field: String },

    #[error("unknown relation '{relation}' on entity '{entity}'")]
    UnknownRelation {
        entity: &'static str,
        relation: String,
    },
}

///
/// Compiler
///
/// Stateless criterion compiler. Holds only the CONTAIN escape character.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Compiler {
    escape: char,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(DEFAULT_ESCAPE)
    }
}

impl Compiler {
    #[must_use]
    pub const fn new(escape: char) -> Self {
        Self { escape }
    }

    #[must_use]
    pub const fn escape(&self) -> char {
        self.escape
    }

    /// Compile one criterion. Joins named by the column are opened on `ctx`.
    pub fn compile<C>(&self, criterion: &Criterion, ctx: &mut C) -> Result<Predicate, CompileError>
    where
        C: QueryContext + ?Sized,
    {
        let operator = criterion.operator;
        if operator.requires_values() && criterion.values.is_empty() {
            return Err(CompileError::MissingValue {
                column: criterion.column.clone(),
                operator,
            });
        }

        let path = FieldPath::parse(&criterion.column)?;

        let mut source = Source::Root;
        for hop in &path.hops {
            source = ctx.join(source, hop)?;
        }

        let mut branches = Vec::with_capacity(path.fields.len());
        for name in &path.fields {
            let field = ctx.get(source, name)?;
            self.field_predicates(criterion, field, &mut branches)?;
        }

        let predicate = Predicate::Or(branches);
        debug!(
            entity = ctx.model().entity_name,
            column = %criterion.column,
            %operator,
            %predicate,
            "compiled criterion"
        );

        Ok(predicate)
    }

    // Pushes the predicate(s) for one sibling field; CONTAIN-family operators
    // push one per value.
    fn field_predicates(
        &self,
        criterion: &Criterion,
        field: FieldRef,
        out: &mut Vec<Predicate>,
    ) -> Result<(), CompileError> {
        let values = &criterion.values;

        match criterion.operator {
            Operator::Contain => {
                out.extend(values.iter().map(|value| {
                    let pattern = contains_pattern(&value.to_string(), self.escape);
                    Predicate::like(field, pattern, Some(self.escape))
                }));
            }
            Operator::ContainWithWildcard => {
                out.extend(values.iter().map(|value| {
                    Predicate::like(field, wildcard_pattern(&value.to_string()), None)
                }));
            }
            Operator::NotContain => {
                out.extend(values.iter().map(|value| {
                    let pattern = contains_pattern(&value.to_string(), self.escape);
                    Predicate::not(Predicate::like(field, pattern, Some(self.escape)))
                }));
            }
            Operator::NotContainWithWildcard => {
                out.extend(values.iter().map(|value| {
                    Predicate::not(Predicate::like(
                        field,
                        wildcard_pattern(&value.to_string()),
                        None,
                    ))
                }));
            }
            Operator::Equals => out.push(compare_first(criterion, field, CompareOp::Eq)?),
            Operator::NotEqual => out.push(compare_first(criterion, field, CompareOp::Ne)?),
            Operator::GreaterThan => out.push(compare_first(criterion, field, CompareOp::Gt)?),
            Operator::LesserThan => out.push(compare_first(criterion, field, CompareOp::Lt)?),
            Operator::GreaterEquals => out.push(compare_first(criterion, field, CompareOp::Gte)?),
            Operator::LesserEquals => out.push(compare_first(criterion, field, CompareOp::Lte)?),
            Operator::In => out.push(membership(criterion, field)?),
            Operator::NotIn => out.push(Predicate::not(membership(criterion, field)?)),
            Operator::True => out.push(Predicate::IsTrue { field }),
            Operator::False => out.push(Predicate::not(Predicate::IsTrue { field })),
            Operator::Null => out.push(Predicate::IsNull { field }),
            Operator::NotNull => out.push(Predicate::IsNotNull { field }),
        }

        Ok(())
    }
}

/// Compile one criterion with the default escape character.
pub fn compile<C>(criterion: &Criterion, ctx: &mut C) -> Result<Predicate, CompileError>
where
    C: QueryContext + ?Sized,
{
    Compiler::default().compile(criterion, ctx)
}

// Comparison operators read the first value only.
fn compare_first(
    criterion: &Criterion,
    field: FieldRef,
    op: CompareOp,
) -> Result<Predicate, CompileError> {
    let raw = criterion
        .first_value()
        .ok_or_else(|| CompileError::MissingValue {
            column: criterion.column.clone(),
            operator: criterion.operator,
        })?;

    let value = coerce_for(field, raw)?;

    Ok(Predicate::compare(field, op, value))
}

// Every value is coerced; duplicates collapse into one set.
fn membership(criterion: &Criterion, field: FieldRef) -> Result<Predicate, CompileError> {
    let values = criterion
        .values
        .iter()
        .map(|raw| coerce_for(field, raw))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Predicate::compare(
        field,
        CompareOp::In,
        Value::unique_list(values),
    ))
}

fn coerce_for(field: FieldRef, raw: &RawValue) -> Result<Value, CompileError> {
    coerce(field.kind, raw).map_err(|source| CompileError::InvalidValue {
        field: field.name.to_string(),
        source,
    })
}
