use crate::value::Value;
use std::fmt;

///
/// FieldModel
/// Runtime field metadata used by the codec, merger and query validator.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldModel {
    /// Field name as used in masks, predicates and wire keys.
    pub name: &'static str,
    /// Scalar type shape of the field (element type for repeated fields).
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    /// Create-time fallback when the field is left unspecified.
    pub default: FieldDefault,
}

impl FieldModel {
    #[must_use]
    pub const fn new(
        name: &'static str,
        kind: FieldKind,
        cardinality: Cardinality,
        default: FieldDefault,
    ) -> Self {
        Self {
            name,
            kind,
            cardinality,
            default,
        }
    }

    /// Non-nullable scalar that must be supplied on create.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Cardinality::Scalar, FieldDefault::Required)
    }

    /// Non-nullable scalar assigned by the store (ids, timestamps).
    #[must_use]
    pub const fn generated(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Cardinality::Scalar, FieldDefault::Generated)
    }

    /// Nullable scalar defaulting to null on create.
    #[must_use]
    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Cardinality::Nullable, FieldDefault::Null)
    }

    /// Repeated field defaulting to an explicitly empty list on create.
    #[must_use]
    pub const fn repeated(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind, Cardinality::Repeated, FieldDefault::EmptyList)
    }

    #[must_use]
    pub const fn with_default(self, default: FieldDefault) -> Self {
        Self { default, ..self }
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self.cardinality, Cardinality::Nullable)
    }

    #[must_use]
    pub const fn is_repeated(&self) -> bool {
        matches!(self.cardinality, Cardinality::Repeated)
    }
}

///
/// FieldKind
///
/// Scalar type surface of a field. Aligned with `Value` variants.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Int,
    Uint,
    Float64,
    Text,
    Enum {
        /// Fully-qualified enum path (diagnostics only).
        path: &'static str,
        /// Declared member names, in declaration order.
        variants: &'static [&'static str],
    },
}

impl FieldKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float64 => "float64",
            Self::Text => "text",
            Self::Enum { .. } => "enum",
        }
    }

    /// Enum domain, when this is an enum kind.
    #[must_use]
    pub const fn enum_variants(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Enum { variants, .. } => Some(variants),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum { path, .. } => write!(f, "enum {path}"),
            other => f.write_str(other.label()),
        }
    }
}

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    /// Single value; may be unspecified but never null.
    Scalar,
    /// Single value; may additionally be explicitly null.
    Nullable,
    /// List of values; never null, replaced wholesale on update.
    Repeated,
}

///
/// FieldDefault
///
/// What a create request stores for a field it left unspecified.
///

#[derive(Clone, Copy, Debug)]
pub enum FieldDefault {
    /// Create fails when the field is unspecified.
    Required,
    /// Field is left unspecified; the store assigns it.
    Generated,
    /// Field becomes null (nullable fields only).
    Null,
    /// Field becomes an explicitly set empty list (repeated fields only).
    EmptyList,
    /// Field takes the produced value.
    Value(fn() -> Value),
}
