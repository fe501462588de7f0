use crate::model::field::FieldModel;
use std::fmt;

///
/// ResourceModel
/// Minimal, statically declared runtime model for one resource type.
///

#[derive(Debug)]
pub struct ResourceModel {
    /// Fully-qualified type path (for diagnostics).
    pub path: &'static str,
    /// Stable external name used in routing and query signatures.
    pub name: &'static str,
    /// How the external store resolves this resource.
    pub backing: Backing,
    /// Ordered field list (authoritative for iteration order).
    pub fields: &'static [FieldModel],
}

impl ResourceModel {
    /// Position of `name` in the field list.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Two models describe the same resource type when their paths agree.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.path == other.path
    }
}

///
/// Backing
///
/// Capability flag selecting the filter grammar a resource accepts.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Backing {
    /// Database table: full filter grammar.
    #[default]
    Table,
    /// Computed view: equality joined by AND only.
    View,
}

impl Backing {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
        }
    }
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
