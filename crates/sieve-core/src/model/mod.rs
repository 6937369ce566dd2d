//! Runtime schema metadata supplied by the storage mapping layer.
//!
//! Models are plain `'static` data: the compiler resolves criterion columns
//! against them and never inspects entity types directly.

pub mod entity;
pub mod field;
pub mod relation;
