use crate::value::Value;

///
/// FieldState
///
/// Tri-state presence of one resource field within one message instance.
/// Absence says nothing about the stored entity, only about this message.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum FieldState {
    #[default]
    Unspecified,
    /// Explicitly null. Only legal on nullable scalar fields.
    Null,
    Specified(FieldValue),
}

impl FieldState {
    /// Specified scalar.
    #[must_use]
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Specified(FieldValue::Scalar(value.into()))
    }

    /// Specified list, marked as explicitly set.
    #[must_use]
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Specified(FieldValue::List(ListValue::new(
            items.into_iter().map(Into::into).collect(),
            true,
        )))
    }

    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this state carries information for presence purposes.
    ///
    /// An empty list that was never explicitly set is indistinguishable
    /// from an unspecified field.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        match self {
            Self::Unspecified => false,
            Self::Null | Self::Specified(FieldValue::Scalar(_)) => true,
            Self::Specified(FieldValue::List(list)) => list.is_present(),
        }
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Specified(FieldValue::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&ListValue> {
        match self {
            Self::Specified(FieldValue::List(list)) => Some(list),
            _ => None,
        }
    }
}

///
/// FieldValue
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Scalar(Value),
    List(ListValue),
}

///
/// ListValue
///
/// Repeated field payload. `explicitly_set` only disambiguates the empty
/// list; it never overrides a non-empty one.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ListValue {
    items: Vec<Value>,
    explicitly_set: bool,
}

impl ListValue {
    #[must_use]
    pub const fn new(items: Vec<Value>, explicitly_set: bool) -> Self {
        Self {
            items,
            explicitly_set,
        }
    }

    /// Explicitly set empty list ("clear this field").
    #[must_use]
    pub const fn cleared() -> Self {
        Self::new(Vec::new(), true)
    }

    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    #[must_use]
    pub const fn explicitly_set(&self) -> bool {
        self.explicitly_set
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        !self.items.is_empty() || self.explicitly_set
    }
}
