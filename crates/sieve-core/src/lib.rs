//! Core runtime for Sieve: entity models, values, the filter request model,
//! the filter-to-predicate compiler, the storage boundary, and the executor
//! and service surfaces built on top of them.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Page size used when a request asks for an unbounded page (`size <= 0`).
///
/// Mirrors the largest signed 32-bit page size a wire request can carry.
pub const MAX_PAGE_SIZE: u32 = i32::MAX.unsigned_abs();

/// Relationship hop separator inside a criterion or sort column.
pub const PATH_SEPARATOR: char = '.';

/// Sibling field separator at the last hop of a criterion column.
pub const FIELD_SEPARATOR: char = ',';

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::request::{CriteriaOperator, Criterion, FilterRequest, Operator, Sort, SortDirection},
        model::{
            entity::EntityModel,
            field::{EnumModel, FieldKind, FieldModel},
            relation::{Cardinality, RelationModel},
        },
        traits::{EntityKind, EntityValue},
        value::{RawValue, Value},
    };
}
