use crate::{config::ConfigError, engine::EngineError};
use candid::CandidType;
use derive_more::Display;
use resmask_core::{
    codec::DecodeError,
    cursor::CursorError,
    error::{Error as CoreError, ErrorOrigin as CoreErrorOrigin},
    model::ModelError,
    query::QueryError,
    store::StoreError,
    validate::ValidationError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        let origin = err.origin().into();
        let message = err.to_string();

        let kind = match err {
            CoreError::Decode(_) => ErrorKind::Decode,
            CoreError::Validation(_) | CoreError::Query(QueryError::Validation(_)) => {
                ErrorKind::Validation
            }
            CoreError::Query(QueryError::Cursor(err)) | CoreError::Cursor(err) => {
                cursor_kind(&err)
            }
            CoreError::Query(err) => ErrorKind::Query(QueryErrorKind::from(&err)),
            CoreError::Store(StoreError::StaleCursor { .. }) => ErrorKind::StaleCursor,
            CoreError::Store(StoreError::Unavailable { .. }) => ErrorKind::StoreUnavailable,
            CoreError::Model(_) => ErrorKind::Model,
        };

        Self::new(kind, origin, message)
    }
}

const fn cursor_kind(err: &CursorError) -> ErrorKind {
    match err {
        CursorError::Encode(_) => ErrorKind::Internal,
        _ => ErrorKind::Cursor,
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

impl From<EngineError> for Error {
    fn from(err: EngineError) -> Self {
        let kind = match err {
            EngineError::UnknownResource { .. } => ErrorKind::UnknownResource,
            EngineError::DuplicateResource { .. } => ErrorKind::Model,
        };

        Self::new(kind, ErrorOrigin::Engine, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and transport adapters.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Malformed wire data.
    Decode,

    /// A field state the resource schema does not admit.
    Validation,

    Query(QueryErrorKind),

    /// The page token is malformed or belongs to a different query.
    Cursor,

    /// The store no longer recognises the continuation; restart the listing.
    StaleCursor,

    StoreUnavailable,

    /// The request names a resource no engine has registered.
    UnknownResource,

    /// A resource model is structurally invalid or registered twice.
    Model,

    Config,

    /// The caller cannot remediate this.
    Internal,
}

///
/// QueryErrorKind
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Filter or order_by is not in the grammar.
    Syntax,

    /// The query names a field that is unknown or cannot be queried.
    UnsupportedField,

    /// The construct is valid but not on this resource's backing.
    UnsupportedOperation,

    /// Well-formed but rejected by a query limit or a duplicate order term.
    Invalid,
}

impl From<&QueryError> for QueryErrorKind {
    fn from(err: &QueryError) -> Self {
        match err {
            QueryError::Syntax(_) => Self::Syntax,
            QueryError::UnsupportedField(_) => Self::UnsupportedField,
            QueryError::UnsupportedOperation(_) => Self::UnsupportedOperation,
            QueryError::Validation(_)
            | QueryError::DuplicateOrderField { .. }
            | QueryError::PageSizeTooLarge { .. }
            | QueryError::FilterTooLong { .. }
            | QueryError::Cursor(_) => Self::Invalid,
        }
    }
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers and transport adapters.
///

#[derive(CandidType, Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Codec,
    Config,
    Cursor,
    Engine,
    Merge,
    Model,
    Query,
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Codec => Self::Codec,
            CoreErrorOrigin::Cursor => Self::Cursor,
            CoreErrorOrigin::Merge => Self::Merge,
            CoreErrorOrigin::Model => Self::Model,
            CoreErrorOrigin::Query => Self::Query,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}
