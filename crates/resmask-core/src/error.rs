use crate::{
    codec::DecodeError,
    cursor::CursorError,
    model::ModelError,
    query::QueryError,
    store::StoreError,
    validate::ValidationError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Aggregate of every failure the core can report, with a stable
/// classification for the facade to map from.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Cursor(#[from] CursorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Decode(_) | Self::Validation(_) => ErrorClass::Invalid,
            Self::Query(err) => err.class(),
            Self::Cursor(err) => err.class(),
            Self::Store(StoreError::StaleCursor { .. }) => ErrorClass::Stale,
            Self::Store(StoreError::Unavailable { .. }) => ErrorClass::Unavailable,
            Self::Model(_) => ErrorClass::InvariantViolation,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Decode(_) => ErrorOrigin::Codec,
            Self::Validation(_) => ErrorOrigin::Merge,
            Self::Query(QueryError::Cursor(_)) | Self::Cursor(_) => ErrorOrigin::Cursor,
            Self::Query(_) => ErrorOrigin::Query,
            Self::Store(_) => ErrorOrigin::Store,
            Self::Model(_) => ErrorOrigin::Model,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {self}", self.origin(), self.class())
    }
}

impl QueryError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedField(_) | Self::UnsupportedOperation(_) => ErrorClass::Unsupported,
            Self::Cursor(err) => err.class(),
            Self::Syntax(_)
            | Self::Validation(_)
            | Self::DuplicateOrderField { .. }
            | Self::PageSizeTooLarge { .. }
            | Self::FilterTooLong { .. } => ErrorClass::Invalid,
        }
    }
}

impl CursorError {
    pub(crate) const fn class(&self) -> ErrorClass {
        match self {
            Self::Encode(_) => ErrorClass::InvariantViolation,
            Self::Text(_)
            | Self::Decode(_)
            | Self::UnsupportedVersion { .. }
            | Self::SignatureMismatch { .. }
            | Self::OffsetMismatch { .. } => ErrorClass::Invalid,
        }
    }
}

///
/// ErrorClass
/// Runtime classification of a core error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The caller sent something malformed or inconsistent.
    Invalid,
    /// Well-formed but outside what the resource supports.
    Unsupported,
    /// The store no longer recognises the continuation.
    Stale,
    Unavailable,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Invalid => "invalid",
            Self::Unsupported => "unsupported",
            Self::Stale => "stale",
            Self::Unavailable => "unavailable",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Component an error was raised in.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Codec,
    Merge,
    Query,
    Cursor,
    Store,
    Model,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Codec => "codec",
            Self::Merge => "merge",
            Self::Query => "query",
            Self::Cursor => "cursor",
            Self::Store => "store",
            Self::Model => "model",
        };
        write!(f, "{label}")
    }
}
