use crate::{model::entity::EntityModel, value::Value};
use std::fmt::Debug;

///
/// EntityKind
///
/// A persisted entity type: its runtime model and its primary key.
///

pub trait EntityKind: EntityValue + Clone + Debug {
    type Key: Clone + Debug + Ord;

    const MODEL: &'static EntityModel;

    fn key(&self) -> Self::Key;
}

///
/// EntityValue
///
/// Read access to an entity's columns and loaded relationships by name.
/// This is the surface the in-memory store evaluates predicates against.
///

pub trait EntityValue {
    /// Read a column; `None` if the entity has no such column,
    /// `Some(Value::Null)` if the column holds NULL.
    fn get_value(&self, field: &str) -> Option<Value>;

    /// Rows on the far side of a relationship (empty for a missing to-one).
    fn related(&self, relation: &str) -> Vec<&dyn EntityValue> {
        let _ = relation;
        Vec::new()
    }
}
