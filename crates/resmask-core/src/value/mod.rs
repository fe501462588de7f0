mod float;


use crate::model::field::FieldKind;
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use float::Float64;

///
/// Value
///
/// Scalar payload carried by a specified field.
/// Nullness is not a value; it lives on `FieldState::Null`.
///

#[derive(CandidType, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float64(Float64),
    Text(String),
    Enum(String),
}

impl Value {
    /// Build a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build an enum value from a member name.
    #[must_use]
    pub fn enum_member(member: impl Into<String>) -> Self {
        Self::Enum(member.into())
    }

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        match self {
            Self::Bool(_) => ValueTag::Bool,
            Self::Int(_) => ValueTag::Int,
            Self::Uint(_) => ValueTag::Uint,
            Self::Float64(_) => ValueTag::Float64,
            Self::Text(_) => ValueTag::Text,
            Self::Enum(_) => ValueTag::Enum,
        }
    }

    /// Returns true if this value is storable in a field of `kind`.
    ///
    /// Enum membership is checked here as well, so a `true` answer means the
    /// value is fully admissible.
    #[must_use]
    pub fn fits(&self, kind: &FieldKind) -> bool {
        match (self, kind) {
            (Self::Bool(_), FieldKind::Bool)
            | (Self::Int(_), FieldKind::Int)
            | (Self::Uint(_), FieldKind::Uint)
            | (Self::Float64(_), FieldKind::Float64)
            | (Self::Text(_), FieldKind::Text) => true,
            (Self::Enum(member), FieldKind::Enum { variants, .. }) => {
                variants.contains(&member.as_str())
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Enum(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<Float64> for Value {
    fn from(v: Float64) -> Self {
        Self::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

///
/// ValueTag
///
/// Kind label used in diagnostics.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Bool,
    Int,
    Uint,
    Float64,
    Text,
    Enum,
}

impl ValueTag {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float64 => "float64",
            Self::Text => "text",
            Self::Enum => "enum",
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
