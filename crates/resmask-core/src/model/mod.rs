//! Static resource and field models.
//!
//! Models are declared as `static` items and validated once, when a resource
//! is registered with an engine. Everything downstream (codec, merger, mask
//! evaluator, query validator) trusts a validated model.

pub mod field;
pub mod resource;

#[cfg(test)]
mod tests;

use crate::{
    codec::wire::reserved_wire_keys,
    model::{
        field::{Cardinality, FieldDefault},
        resource::ResourceModel,
    },
    query::is_keyword,
};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

// re-exports
pub use field::FieldModel;
pub use resource::Backing;

///
/// ModelError
/// Structural problems in a statically declared resource model.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ModelError {
    #[error("resource '{path}' has an empty name")]
    EmptyResourceName { path: &'static str },

    #[error("resource '{resource}' has a field with an empty name")]
    EmptyFieldName { resource: &'static str },

    #[error("resource '{resource}': field '{field}' is a reserved query keyword")]
    ReservedFieldName {
        resource: &'static str,
        field: &'static str,
    },

    #[error("resource '{resource}' declares field '{field}' more than once")]
    DuplicateField {
        resource: &'static str,
        field: &'static str,
    },

    #[error("resource '{resource}': wire key '{key}' is claimed by both '{first}' and '{second}'")]
    WireKeyCollision {
        resource: &'static str,
        key: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("resource '{resource}': field '{field}' has an invalid default ({reason})")]
    InvalidDefault {
        resource: &'static str,
        field: &'static str,
        reason: &'static str,
    },

    #[error("resource '{resource}': enum field '{field}' declares no members")]
    EmptyEnum {
        resource: &'static str,
        field: &'static str,
    },

    #[error("resource '{resource}': enum field '{field}' declares member '{member}' twice")]
    DuplicateEnumMember {
        resource: &'static str,
        field: &'static str,
        member: &'static str,
    },
}

impl ResourceModel {
    /// Check structural invariants of this model.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.is_empty() {
            return Err(ModelError::EmptyResourceName { path: self.path });
        }

        let mut seen = BTreeSet::new();
        let mut claimed: BTreeMap<String, &'static str> = BTreeMap::new();

        for field in self.fields {
            if field.name.is_empty() {
                return Err(ModelError::EmptyFieldName {
                    resource: self.name,
                });
            }
            if is_keyword(field.name) {
                return Err(ModelError::ReservedFieldName {
                    resource: self.name,
                    field: field.name,
                });
            }
            if !seen.insert(field.name) {
                return Err(ModelError::DuplicateField {
                    resource: self.name,
                    field: field.name,
                });
            }

            for key in reserved_wire_keys(field) {
                if let Some(first) = claimed.get(&key) {
                    return Err(ModelError::WireKeyCollision {
                        resource: self.name,
                        key,
                        first: *first,
                        second: field.name,
                    });
                }
                claimed.insert(key, field.name);
            }

            validate_enum(self.name, field)?;
            validate_default(self.name, field)?;
        }

        Ok(())
    }
}

fn validate_enum(resource: &'static str, field: &FieldModel) -> Result<(), ModelError> {
    let Some(variants) = field.kind.enum_variants() else {
        return Ok(());
    };

    if variants.is_empty() {
        return Err(ModelError::EmptyEnum {
            resource,
            field: field.name,
        });
    }

    let mut seen = BTreeSet::new();
    for member in variants {
        if !seen.insert(*member) {
            return Err(ModelError::DuplicateEnumMember {
                resource,
                field: field.name,
                member: *member,
            });
        }
    }

    Ok(())
}

fn validate_default(resource: &'static str, field: &FieldModel) -> Result<(), ModelError> {
    let invalid = |reason| ModelError::InvalidDefault {
        resource,
        field: field.name,
        reason,
    };

    match (field.default, field.cardinality) {
        (FieldDefault::Null, Cardinality::Scalar | Cardinality::Repeated) => {
            Err(invalid("null default on a non-nullable field"))
        }
        (FieldDefault::EmptyList, Cardinality::Scalar | Cardinality::Nullable) => {
            Err(invalid("empty-list default on a scalar field"))
        }
        (FieldDefault::Value(_), Cardinality::Repeated) => {
            Err(invalid("scalar default on a repeated field"))
        }
        (FieldDefault::Value(make), _) => {
            if make().fits(&field.kind) {
                Ok(())
            } else {
                Err(invalid("default value does not fit the field kind"))
            }
        }
        _ => Ok(()),
    }
}
