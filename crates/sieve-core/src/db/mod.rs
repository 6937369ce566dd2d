//! Module: db
//! Responsibility: the request → specification → storage pipeline.
//! Does not own: entity schema declarations (see `model`).
//! Boundary: `executor` and `service` are the only entrypoints callers use;
//! `query` and `store` are exposed for callers that plug in their own storage.

pub mod executor;
pub mod query;
pub mod request;
pub mod response;
pub mod service;
pub mod store;

// re-exports
pub use executor::QueryExecutor;
pub use query::{PageRequest, Specification};
pub use request::FilterRequest;
pub use response::Page;
pub use service::{EntityService, Service};
pub use store::{MemoryRepository, Repository, StoreError};
