use thiserror::Error as ThisError;

///
/// DecodeError
///
/// Malformed wire data for one field. Decoding stops at the first error
/// and nothing is applied.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("malformed wire field '{field}' (key '{key}'): {reason}")]
pub struct DecodeError {
    /// Model field name (or the raw key when no field claims it).
    pub field: String,
    /// Wire key that carried the offending data.
    pub key: String,
    pub reason: DecodeErrorReason,
}

impl DecodeError {
    pub(crate) fn new(
        field: impl Into<String>,
        key: impl Into<String>,
        reason: DecodeErrorReason,
    ) -> Self {
        Self {
            field: field.into(),
            key: key.into(),
            reason,
        }
    }
}

///
/// DecodeErrorReason
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeErrorReason {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("both the value and the null marker are present")]
    ConflictingPresence,

    #[error("null marker must be `true`")]
    InvalidNullMarker,

    #[error("field is not nullable")]
    NullNotAllowed,

    #[error("set flag must be a bool")]
    InvalidSetFlag,

    #[error("repeated field expects a list")]
    ExpectedList,

    #[error("scalar field does not accept a list")]
    ExpectedScalar,

    #[error("'{member}' is not a declared enum member")]
    UnknownEnumMember { member: String },

    #[error("float is not finite")]
    NonFiniteFloat,

    #[error("integer is out of range for {expected}")]
    IntegerOutOfRange { expected: &'static str },

    #[error("key is not part of the resource")]
    UnknownField,
}
