use crate::cursor::{CursorError, signature::QuerySignature};
use serde::{Deserialize, Serialize};
use serde_cbor::{from_slice, to_vec};
use std::panic::{AssertUnwindSafe, catch_unwind};
use thiserror::Error as ThisError;

/// Largest CBOR payload a client-supplied token may carry.
pub(crate) const MAX_PAGE_TOKEN_BYTES: usize = 8 * 1024;

const TEXT_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Current page token layout.
pub const PAGE_TOKEN_VERSION: u8 = 1;

///
/// PageToken
///
/// Opaque cursor handed to clients as `next_page_token`. Wraps the store's
/// own continuation bytes and binds them to the query that produced them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageToken {
    signature: QuerySignature,
    initial_offset: u64,
    resume: Vec<u8>,
}

///
/// PageTokenWire
///

#[derive(Deserialize, Serialize)]
struct PageTokenWire {
    version: u8,
    signature: [u8; 32],
    initial_offset: u64,
    resume: Vec<u8>,
}

impl PageToken {
    #[must_use]
    pub const fn new(signature: QuerySignature, initial_offset: u64, resume: Vec<u8>) -> Self {
        Self {
            signature,
            initial_offset,
            resume,
        }
    }

    #[must_use]
    pub const fn signature(&self) -> QuerySignature {
        self.signature
    }

    /// Offset of the request that started this cursor chain.
    #[must_use]
    pub const fn initial_offset(&self) -> u64 {
        self.initial_offset
    }

    /// Store-owned continuation bytes.
    #[must_use]
    pub fn resume(&self) -> &[u8] {
        &self.resume
    }

    #[must_use]
    pub fn into_resume(self) -> Vec<u8> {
        self.resume
    }

    /// Encode into the hex text handed to clients.
    pub fn encode(&self) -> Result<String, CursorError> {
        self.encode_with_version(PAGE_TOKEN_VERSION)
    }

    pub(crate) fn encode_with_version(&self, version: u8) -> Result<String, CursorError> {
        let wire = PageTokenWire {
            version,
            signature: self.signature.into_bytes(),
            initial_offset: self.initial_offset,
            resume: self.resume.clone(),
        };
        let bytes = to_vec(&wire).map_err(|err| CursorError::Encode(err.to_string()))?;

        Ok(token_text(&bytes))
    }

    /// Decode client-supplied token text.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = token_bytes(token)?;
        let wire: PageTokenWire = match catch_unwind(AssertUnwindSafe(|| from_slice(&bytes))) {
            Ok(Ok(wire)) => wire,
            Ok(Err(err)) => return Err(CursorError::Decode(err.to_string())),
            Err(_) => {
                return Err(CursorError::Decode(
                    "panic during CBOR deserialization".to_string(),
                ));
            }
        };

        if wire.version != PAGE_TOKEN_VERSION {
            return Err(CursorError::UnsupportedVersion {
                version: wire.version,
            });
        }

        Ok(Self::new(
            QuerySignature::from_bytes(wire.signature),
            wire.initial_offset,
            wire.resume,
        ))
    }

    /// Check that this token belongs to the query described by
    /// `signature` and `offset`.
    pub fn verify(&self, signature: QuerySignature, offset: u64) -> Result<(), CursorError> {
        if self.signature != signature {
            return Err(CursorError::SignatureMismatch {
                expected: signature,
                actual: self.signature,
            });
        }
        if self.initial_offset != offset {
            return Err(CursorError::OffsetMismatch {
                expected: offset,
                actual: self.initial_offset,
            });
        }

        Ok(())
    }
}

///
/// TokenTextError
/// The token string is not the text form of any payload.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TokenTextError {
    #[error("token is blank")]
    Blank,

    #[error("token is {len} characters long (max {max})")]
    Oversized { len: usize, max: usize },

    #[error("token has an odd number of characters ({len})")]
    OddLength { len: usize },

    #[error("character {position} of the token is not a hex digit")]
    NotHex { position: usize },
}

/// Lowercase hex text of `bytes`.
pub(crate) fn token_text(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|byte| {
            [
                TEXT_DIGITS[usize::from(byte >> 4)],
                TEXT_DIGITS[usize::from(byte & 0x0f)],
            ]
        })
        .map(char::from)
        .collect()
}

/// Payload bytes behind token text. Either case is accepted and surrounding
/// whitespace is ignored; positions in errors count from 1.
pub(crate) fn token_bytes(text: &str) -> Result<Vec<u8>, TokenTextError> {
    let text = text.trim();
    let max = MAX_PAGE_TOKEN_BYTES * 2;

    if text.is_empty() {
        return Err(TokenTextError::Blank);
    }
    if text.len() > max {
        return Err(TokenTextError::Oversized {
            len: text.len(),
            max,
        });
    }
    if !text.len().is_multiple_of(2) {
        return Err(TokenTextError::OddLength { len: text.len() });
    }

    let digit = |index: usize, byte: u8| {
        char::from(byte)
            .to_digit(16)
            .and_then(|value| u8::try_from(value).ok())
            .ok_or(TokenTextError::NotHex {
                position: index + 1,
            })
    };

    text.as_bytes()
        .chunks_exact(2)
        .enumerate()
        .map(|(pair, chars)| -> Result<u8, TokenTextError> {
            let high = digit(pair * 2, chars[0])?;
            let low = digit(pair * 2 + 1, chars[1])?;

            Ok((high << 4) | low)
        })
        .collect()
}
