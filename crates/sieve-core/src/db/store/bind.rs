//! Native binding of predicate operands.
//!
//! Passthrough criterion values arrive as whatever the client sent; binding
//! converts them to each column's native type or rejects the predicate,
//! before any row is read.

use crate::{
    db::{
        query::predicate::{CompareOp, ComparePredicate, FieldRef, Predicate},
        store::StoreError,
    },
    model::field::FieldKind,
    value::Value,
};

/// Return a copy of `predicate` whose operands are all native to their columns.
pub(crate) fn bind(predicate: &Predicate) -> Result<Predicate, StoreError> {
    let bound = match predicate {
        Predicate::True => Predicate::True,
        Predicate::False => Predicate::False,
        Predicate::And(preds) => Predicate::And(bind_all(preds)?),
        Predicate::Or(preds) => Predicate::Or(bind_all(preds)?),
        Predicate::Not(inner) => Predicate::not(bind(inner)?),
        Predicate::Compare(cmp) => Predicate::Compare(bind_compare(cmp)?),
        Predicate::IsTrue { field } => {
            if !matches!(field.kind, FieldKind::Bool) {
                return Err(mismatch(field, "boolean test"));
            }
            Predicate::IsTrue { field: *field }
        }
        Predicate::Like(_) | Predicate::IsNull { .. } | Predicate::IsNotNull { .. } => {
            predicate.clone()
        }
    };

    Ok(bound)
}

fn bind_all(preds: &[Predicate]) -> Result<Vec<Predicate>, StoreError> {
    preds.iter().map(bind).collect()
}

fn bind_compare(cmp: &ComparePredicate) -> Result<ComparePredicate, StoreError> {
    let field = &cmp.field;

    if cmp.op.is_ordering() && !field.kind.is_orderable() {
        return Err(mismatch(field, "ordering comparison"));
    }

    let value = match (cmp.op, &cmp.value) {
        (CompareOp::In, Value::List(items)) => Value::List(
            items
                .iter()
                .map(|item| bind_value(field, item))
                .collect::<Result<_, _>>()?,
        ),
        (CompareOp::In, _) | (_, Value::List(_)) => {
            return Err(mismatch(field, "membership test"));
        }
        (_, value) => bind_value(field, value)?,
    };

    Ok(ComparePredicate::new(*field, cmp.op, value))
}

fn bind_value(field: &FieldRef, value: &Value) -> Result<Value, StoreError> {
    let bound = match (field.kind, value) {
        (FieldKind::Int, Value::Int(v)) => Some(Value::Int(*v)),
        (FieldKind::Int, Value::Text(text)) => text.trim().parse().ok().map(Value::Int),

        (FieldKind::Float, Value::Float(v)) => Some(Value::Float(*v)),
        (FieldKind::Float, Value::Int(v)) => Some(Value::Float(int_to_float(*v))),
        (FieldKind::Float, Value::Text(text)) => text.trim().parse().ok().map(Value::Float),

        (FieldKind::Bool, Value::Bool(v)) => Some(Value::Bool(*v)),
        (FieldKind::Bool, Value::Text(text)) => parse_bool(text).map(Value::Bool),

        (FieldKind::Text, Value::Text(_))
        | (FieldKind::Timestamp, Value::Timestamp(_))
        | (FieldKind::Uuid, Value::Uuid(_)) => Some(value.clone()),

        (FieldKind::Enum(model), Value::Enum(member)) => model
            .variant_at(member.ordinal)
            .filter(|name| *name == member.name)
            .map(|_| value.clone()),

        _ => None,
    };

    bound.ok_or_else(|| mismatch(field, &format!("{} operand", value.label())))
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        t if t.eq_ignore_ascii_case("true") => Some(true),
        t if t.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

#[expect(clippy::cast_precision_loss)]
const fn int_to_float(value: i64) -> f64 {
    value as f64
}

fn mismatch(field: &FieldRef, operation: &str) -> StoreError {
    StoreError::TypeMismatch {
        field: field.name.to_string(),
        kind: field.kind,
        operation: operation.to_string(),
    }
}
