//! Module: store
//! Responsibility: the storage boundary the executor talks to, plus an
//! in-memory reference implementation of it.
//! Does not own: compiling predicates or normalizing storage errors.
//! Boundary: a `Repository` receives compiled specifications and page
//! requests and reports `StoreError` on type/operator incompatibility.

mod bind;
mod eval;
mod like;
mod memory;
mod order;

use crate::{
    db::{
        query::{PageRequest, Specification},
        response::Page,
    },
    model::field::FieldKind,
    traits::EntityKind,
};
use thiserror::Error as ThisError;

// re-exports
pub use like::like_matches;
pub use memory::MemoryRepository;

///
/// StoreError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("{operation} is not supported for {kind} column '{field}'")]
    TypeMismatch {
        field: String,
        kind: FieldKind,
        operation: String,
    },

    #[error("unknown sort field '{field}' on entity '{entity}'")]
    UnknownSortField { entity: &'static str, field: String },

    #[error("cannot sort by '{path}': path crosses a to-many relation")]
    UnsortablePath { path: String },
}

///
/// Repository
///
/// Storage layer contract: CRUD by key plus specification-driven paging
/// and counting. Implementations must evaluate joins as left-outer joins
/// and return each root row at most once.
///

pub trait Repository<E: EntityKind> {
    /// Insert or replace by key; returns the stored entity.
    fn save(&mut self, entity: E) -> E;

    fn save_all(&mut self, entities: Vec<E>) -> Vec<E> {
        entities.into_iter().map(|entity| self.save(entity)).collect()
    }

    fn find_by_id(&self, key: &E::Key) -> Option<E>;

    /// Entities for every key that exists, in key order of the input.
    fn find_all_by_id(&self, keys: &[E::Key]) -> Vec<E> {
        keys.iter().filter_map(|key| self.find_by_id(key)).collect()
    }

    fn find_all(&self) -> Vec<E>;

    /// Remove by key; a missing key is a no-op.
    fn delete_by_id(&mut self, key: &E::Key);

    fn exists_by_id(&self, key: &E::Key) -> bool {
        self.find_by_id(key).is_some()
    }

    /// One page of rows matching the specification, with the total count.
    fn find_page(&self, spec: &Specification, page: &PageRequest)
    -> Result<Page<E>, StoreError>;

    /// Number of rows matching the specification.
    fn count(&self, spec: &Specification) -> Result<u64, StoreError>;
}
