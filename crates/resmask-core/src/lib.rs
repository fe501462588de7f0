//! Core runtime for resmask: tri-state field presence, the wire codec,
//! field masks, partial update merging and list query translation.
//!
//! Everything here is a pure transformation over immutable inputs bound to
//! statically declared resource models.

// public exports are one module level down
pub mod codec;
pub mod cursor;
pub mod error;
pub mod mask;
pub mod merge;
pub mod model;
pub mod obs;
pub mod query;
pub mod resource;
pub mod store;
pub mod validate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, codecs, stores or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        mask::{FieldMask, Polarity},
        model::{
            Backing, FieldModel,
            field::{Cardinality, FieldDefault, FieldKind},
            resource::ResourceModel,
        },
        resource::{FieldState, FieldValue, ListValue, Resource},
        value::Value,
    };
}
