use crate::{
    cursor::token::token_text,
    query::{ast::FilterExpr, order::OrderTerm},
};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// QuerySignature
///
/// Stable hash of the query shape a page token is bound to: resource name,
/// canonical filter, canonical order terms and effective page size.
/// Excludes the offset and the token itself.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct QuerySignature([u8; 32]);

impl QuerySignature {
    #[must_use]
    pub fn compute(
        resource: &str,
        filter: Option<&FilterExpr>,
        order_by: &[OrderTerm],
        page_size: u32,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"qsig:v1");

        write_str(&mut hasher, resource);
        match filter {
            Some(expr) => {
                write_tag(&mut hasher, 1);
                write_str(&mut hasher, &expr.to_string());
            }
            None => write_tag(&mut hasher, 0),
        }
        write_u32(&mut hasher, u32::try_from(order_by.len()).unwrap_or(u32::MAX));
        for term in order_by {
            write_str(&mut hasher, &term.to_string());
        }
        write_u32(&mut hasher, page_size);

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);

        Self(out)
    }

    pub(crate) const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub(crate) const fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        token_text(&self.0)
    }
}

impl fmt::Display for QuerySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

fn write_u32(hasher: &mut Sha256, value: u32) {
    hasher.update(value.to_be_bytes());
}

// Length-prefixed so adjacent strings cannot run together.
fn write_str(hasher: &mut Sha256, value: &str) {
    write_u32(hasher, u32::try_from(value.len()).unwrap_or(u32::MAX));
    hasher.update(value.as_bytes());
}
