//! Page tokens.
//!
//! A page token is the lowercase hex form of a versioned CBOR payload that
//! carries the store's continuation bytes together with the signature of
//! the query they belong to. Replaying a token against a different query
//! fails instead of silently restarting.

mod signature;
mod token;

#[cfg(test)]
mod tests;

use thiserror::Error as ThisError;

// re-exports
pub use signature::QuerySignature;
pub use token::{PAGE_TOKEN_VERSION, PageToken, TokenTextError};

///
/// CursorError
/// Page token failures. The token is never reinterpreted as a fresh start.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CursorError {
    #[error("page token is malformed: {0}")]
    Text(#[from] TokenTextError),

    #[error("failed to decode page token: {0}")]
    Decode(String),

    #[error("failed to encode page token: {0}")]
    Encode(String),

    #[error("unsupported page token version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("page token does not match this query: expected={expected}, actual={actual}")]
    SignatureMismatch {
        expected: QuerySignature,
        actual: QuerySignature,
    },

    #[error("page token was issued for offset {actual}, request has offset {expected}")]
    OffsetMismatch { expected: u64, actual: u64 },
}
