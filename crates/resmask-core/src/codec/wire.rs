//! Transport-native message shape and the field-name suffix convention.
//!
//! The suffixes are a property of the wire, not of the engine: nothing
//! outside this module and the codec looks at them.

use crate::model::{FieldModel, field::Cardinality};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Suffix carrying the value half of a nullable scalar oneof.
pub const VALUE_SUFFIX: &str = "_";
/// Suffix carrying the null marker half of a nullable scalar oneof.
pub const NULL_SUFFIX: &str = "_null";
/// Suffix carrying the explicit-set flag of a repeated field.
pub const SET_SUFFIX: &str = "_set";

///
/// WireValue
///
/// Decoded transport value. Untagged so REST-transcoded JSON maps onto it
/// directly.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    List(Vec<Self>),
}

impl WireValue {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }
}

///
/// WireMessage
///
/// One transport message: wire key → value, as handed over by the
/// transport layer after its own deserialization.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WireMessage {
    entries: BTreeMap<String, WireValue>,
}

impl WireMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: WireValue) -> Option<WireValue> {
        self.entries.insert(key.into(), value)
    }

    /// Builder form of [`WireMessage::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: WireValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, WireValue)> for WireMessage {
    fn from_iter<T: IntoIterator<Item = (String, WireValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[must_use]
pub(crate) fn value_key(field: &FieldModel) -> String {
    format!("{}{VALUE_SUFFIX}", field.name)
}

#[must_use]
pub(crate) fn null_key(field: &FieldModel) -> String {
    format!("{}{NULL_SUFFIX}", field.name)
}

#[must_use]
pub(crate) fn set_key(field: &FieldModel) -> String {
    format!("{}{SET_SUFFIX}", field.name)
}

/// Every wire key the codec interprets for `field`.
///
/// The null key is reserved on every field so that a null marker sent for a
/// non-nullable field is rejected instead of dropped as unknown.
#[must_use]
pub(crate) fn reserved_wire_keys(field: &FieldModel) -> Vec<String> {
    match field.cardinality {
        Cardinality::Scalar => vec![field.name.to_string(), null_key(field)],
        Cardinality::Nullable => vec![value_key(field), null_key(field)],
        Cardinality::Repeated => vec![field.name.to_string(), set_key(field), null_key(field)],
    }
}
