use crate::{
    PATH_SEPARATOR,
    db::{
        query::{OrderDirection, OrderSpec},
        store::StoreError,
    },
    model::{entity::EntityModel, relation::Cardinality},
    traits::EntityValue,
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// SortKey
/// A sort path resolved against the model: to-one hops, then a field.
///

#[derive(Debug)]
pub(crate) struct SortKey {
    hops: Vec<&'static str>,
    field: &'static str,
    direction: OrderDirection,
}

impl SortKey {
    fn value(&self, row: &dyn EntityValue) -> Value {
        let mut current = row;
        for hop in &self.hops {
            match current.related(hop).into_iter().next() {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }

        current.get_value(self.field).unwrap_or(Value::Null)
    }
}

/// Resolve every sort path; only to-one relations may be crossed.
pub(crate) fn resolve(
    model: &'static EntityModel,
    order: &OrderSpec,
) -> Result<Vec<SortKey>, StoreError> {
    order
        .fields
        .iter()
        .map(|(path, direction)| resolve_path(model, path, *direction))
        .collect()
}

fn resolve_path(
    model: &'static EntityModel,
    path: &str,
    direction: OrderDirection,
) -> Result<SortKey, StoreError> {
    let mut segments: Vec<&str> = path.split(PATH_SEPARATOR).map(str::trim).collect();
    let field = segments.pop().unwrap_or_default();

    let mut entity = model;
    let mut hops = Vec::with_capacity(segments.len());
    for segment in segments {
        let relation = entity
            .relation(segment)
            .ok_or_else(|| StoreError::UnknownSortField {
                entity: entity.entity_name,
                field: segment.to_string(),
            })?;
        if relation.cardinality == Cardinality::Many {
            return Err(StoreError::UnsortablePath {
                path: path.to_string(),
            });
        }

        hops.push(relation.name);
        entity = relation.target;
    }

    let field = entity
        .field(field)
        .ok_or_else(|| StoreError::UnknownSortField {
            entity: entity.entity_name,
            field: field.to_string(),
        })?;

    Ok(SortKey {
        hops,
        field: field.name,
        direction,
    })
}

/// Stable multi-key sort. NULL sorts last ascending and first descending.
pub(crate) fn sort_rows<E: EntityValue>(rows: &mut Vec<&E>, keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }

    let mut decorated: Vec<(Vec<Value>, &E)> = rows
        .drain(..)
        .map(|row| (keys.iter().map(|key| key.value(row)).collect(), row))
        .collect();

    decorated.sort_by(|(left, _), (right, _)| compare_keys(keys, left, right));
    rows.extend(decorated.into_iter().map(|(_, row)| row));
}

fn compare_keys(keys: &[SortKey], left: &[Value], right: &[Value]) -> Ordering {
    keys.iter()
        .zip(left.iter().zip(right))
        .map(|(key, (l, r))| match key.direction {
            OrderDirection::Asc => canonical_cmp(l, r),
            OrderDirection::Desc => canonical_cmp(r, l),
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}
