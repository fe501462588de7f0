use crate::{
    model::{FieldModel, field::Cardinality},
    resource::{FieldState, FieldValue},
    value::{Value, ValueTag},
};
use thiserror::Error as ThisError;

///
/// ValidationError
///
/// Semantic rejection of a field state against its schema.
/// Every variant names the offending field.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("field '{field}' is not declared on resource '{resource}'")]
    UnknownField { resource: String, field: String },

    #[error("field '{field}' is not nullable")]
    NullNotAllowed { field: String },

    #[error("field '{field}' is required and has no default")]
    MissingRequired { field: String },

    #[error("field '{field}' expects a {expected} value, found a {found} value")]
    CardinalityMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field '{field}' expects {expected}, found {found}")]
    KindMismatch {
        field: String,
        expected: String,
        found: ValueTag,
    },

    #[error("'{member}' is not a member of the enum on field '{field}'")]
    UnknownEnumMember { field: String, member: String },

    #[error("enum field '{field}' expects a single-quoted member name, found {found}")]
    InvalidEnumLiteral { field: String, found: String },
}

impl ValidationError {
    /// Name of the field this error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field, .. }
            | Self::NullNotAllowed { field }
            | Self::MissingRequired { field }
            | Self::CardinalityMismatch { field, .. }
            | Self::KindMismatch { field, .. }
            | Self::UnknownEnumMember { field, .. }
            | Self::InvalidEnumLiteral { field, .. } => field,
        }
    }
}

/// Check that `state` is admissible for `field`.
pub(crate) fn check_state(field: &FieldModel, state: &FieldState) -> Result<(), ValidationError> {
    match state {
        FieldState::Unspecified => Ok(()),
        FieldState::Null => {
            if field.is_nullable() {
                Ok(())
            } else {
                Err(ValidationError::NullNotAllowed {
                    field: field.name.to_string(),
                })
            }
        }
        FieldState::Specified(FieldValue::Scalar(value)) => {
            if field.is_repeated() {
                return Err(cardinality(field, "scalar"));
            }

            check_value(field, value)
        }
        FieldState::Specified(FieldValue::List(list)) => {
            if !field.is_repeated() {
                return Err(cardinality(field, "list"));
            }

            for item in list.items() {
                check_value(field, item)?;
            }

            Ok(())
        }
    }
}

/// Check one scalar (or list element) against the field kind.
pub(crate) fn check_value(field: &FieldModel, value: &Value) -> Result<(), ValidationError> {
    if value.fits(&field.kind) {
        return Ok(());
    }

    match (value, field.kind.enum_variants()) {
        (Value::Enum(member), Some(_)) => Err(ValidationError::UnknownEnumMember {
            field: field.name.to_string(),
            member: member.clone(),
        }),
        _ => Err(ValidationError::KindMismatch {
            field: field.name.to_string(),
            expected: field.kind.to_string(),
            found: value.tag(),
        }),
    }
}

fn cardinality(field: &FieldModel, found: &'static str) -> ValidationError {
    let expected = match field.cardinality {
        Cardinality::Repeated => "list",
        Cardinality::Scalar | Cardinality::Nullable => "scalar",
    };

    ValidationError::CardinalityMismatch {
        field: field.name.to_string(),
        expected,
        found,
    }
}
