//! ## Crate layout
//! - `core`: entity models, values, the filter request model, the
//!   filter-to-predicate compiler, storage boundary, executor, and service.
//!
//! The `prelude` module carries what a service author needs day to day:
//! the request vocabulary, model declarations, and the service surface.

pub use sieve_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{
    config::FilterConfig,
    db,
    error::{Error, ErrorClass, ErrorOrigin},
};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        config::FilterConfig,
        db::{
            MemoryRepository, Page, QueryExecutor, Repository as _, Service, Specification,
            service::EntityService as _,
        },
        error::Error,
        prelude::*,
    };
    pub use serde::{Deserialize, Serialize};
}
