//! Module: query
//! Responsibility: filter request → specification (predicate + joins) and
//! page request (paging + ordering).
//! Does not own: storage access or result materialization.
//! Boundary: output is plain data a `Repository` can evaluate.

pub mod coerce;
pub mod compile;
pub mod context;
pub mod page;
pub mod predicate;
pub mod specification;

// re-exports
pub use coerce::CoerceError;
pub use compile::{CompileError, Compiler, compile};
pub use context::{QueryContext, QueryRoot};
pub use page::{OrderDirection, OrderSpec, PageRequest};
pub use predicate::{Join, JoinId, Predicate, Source};
pub use specification::{Specification, SpecificationBuilder};
