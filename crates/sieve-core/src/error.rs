use crate::{
    config::ConfigError,
    db::{
        query::CompileError,
        request::{UnsupportedOperator, ValidateError},
        store::StoreError,
    },
};
use std::fmt;
use thiserror::Error as ThisError;

/// Message every storage type/operator incompatibility is normalized to.
pub const ILLEGAL_ARGUMENT_MESSAGE: &str = "field type not support operator or value";

///
/// Error
///
/// Boundary error with a stable class + origin taxonomy.
/// The stage error that produced it is kept for diagnostics and is only
/// reachable through `std::error::Error::source`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    #[source]
    detail: Option<ErrorDetail>,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    fn with_detail(
        class: ErrorClass,
        origin: ErrorOrigin,
        message: impl Into<String>,
        detail: ErrorDetail,
    ) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: Some(detail),
        }
    }

    /// Normalize a storage failure into the single illegal-argument error
    /// callers see, keeping the storage error as the cause.
    pub(crate) fn illegal_argument(cause: StoreError) -> Self {
        Self::with_detail(
            ErrorClass::IllegalArgument,
            ErrorOrigin::Executor,
            ILLEGAL_ARGUMENT_MESSAGE,
            ErrorDetail::Store(cause),
        )
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<UnsupportedOperator> for Error {
    fn from(err: UnsupportedOperator) -> Self {
        Self::with_detail(
            ErrorClass::UnsupportedOperator,
            ErrorOrigin::Request,
            err.to_string(),
            ErrorDetail::Operator(err),
        )
    }
}

impl From<ValidateError> for Error {
    fn from(err: ValidateError) -> Self {
        Self::with_detail(
            ErrorClass::Validation,
            ErrorOrigin::Request,
            err.to_string(),
            ErrorDetail::Validate(err),
        )
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        let class = match &err {
            CompileError::MissingValue { .. } => ErrorClass::MissingValue,
            CompileError::InvalidValue { .. } => ErrorClass::InvalidValue,
            CompileError::InvalidPath { .. }
            | CompileError::UnknownField { .. }
            | CompileError::UnknownRelation { .. } => ErrorClass::Validation,
        };

        Self::with_detail(
            class,
            ErrorOrigin::Query,
            err.to_string(),
            ErrorDetail::Compile(err),
        )
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TypeMismatch { .. } => Self::illegal_argument(err),
            StoreError::UnknownSortField { .. } | StoreError::UnsortablePath { .. } => {
                Self::with_detail(
                    ErrorClass::Validation,
                    ErrorOrigin::Store,
                    err.to_string(),
                    ErrorDetail::Store(err),
                )
            }
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::with_detail(
            ErrorClass::Validation,
            ErrorOrigin::Config,
            err.to_string(),
            ErrorDetail::Config(err),
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::with_detail(
            ErrorClass::Validation,
            ErrorOrigin::Request,
            format!("malformed filter request: {err}"),
            ErrorDetail::Decode(err),
        )
    }
}

///
/// ErrorDetail
///
/// Stage error carried by [`Error`] as its source.
///

#[derive(Debug, ThisError)]
enum ErrorDetail {
    #[error(transparent)]
    Compile(CompileError),

    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Decode(serde_json::Error),

    #[error(transparent)]
    Operator(UnsupportedOperator),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Validate(ValidateError),
}

///
/// ErrorClass
/// Error taxonomy exposed to callers.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The storage layer rejected an operator/value for a column type.
    IllegalArgument,
    /// A value could not be coerced to its column type.
    InvalidValue,
    /// An operator that needs values received none.
    MissingValue,
    /// An operator token is not part of the operator set.
    UnsupportedOperator,
    /// The request shape is invalid (blank columns, unknown fields, bad wire data).
    Validation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::IllegalArgument => "illegal_argument",
            Self::InvalidValue => "invalid_value",
            Self::MissingValue => "missing_value",
            Self::UnsupportedOperator => "unsupported_operator",
            Self::Validation => "validation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Executor,
    Query,
    Request,
    Store,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Executor => "executor",
            Self::Query => "query",
            Self::Request => "request",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}
