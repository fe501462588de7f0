use crate::{
    model::FieldModel,
    resource::{FieldState, Resource},
};
use std::iter::{FusedIterator, Zip};
use std::slice::Iter;

///
/// SpecifiedField
///
/// One entry of the presence view: a field that this message actually
/// carries (a value, an explicit null, or an explicitly set list).
///

#[derive(Clone, Copy, Debug)]
pub struct SpecifiedField<'a> {
    model: &'static FieldModel,
    state: &'a FieldState,
}

impl<'a> SpecifiedField<'a> {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.model.name
    }

    #[must_use]
    pub const fn model(&self) -> &'static FieldModel {
        self.model
    }

    #[must_use]
    pub const fn state(&self) -> &'a FieldState {
        self.state
    }

    /// The repeated-field `set` flag; `None` for scalar fields.
    #[must_use]
    pub fn explicitly_set(&self) -> Option<bool> {
        self.state.as_list().map(|list| list.explicitly_set())
    }
}

///
/// SpecifiedFields
///
/// Lazy, finite iterator over the specified fields of a resource.
/// Cloning restarts from the current position; calling
/// `Resource::specified_fields` again restarts from the beginning.
///

#[derive(Clone)]
pub struct SpecifiedFields<'a> {
    inner: Zip<Iter<'static, FieldModel>, Iter<'a, FieldState>>,
}

impl<'a> Iterator for SpecifiedFields<'a> {
    type Item = SpecifiedField<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find_map(|(model, state)| {
            state
                .is_present()
                .then_some(SpecifiedField { model, state })
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl FusedIterator for SpecifiedFields<'_> {}

impl Resource {
    /// Presence view over the fields this message carries.
    #[must_use]
    pub fn specified_fields(&self) -> SpecifiedFields<'_> {
        SpecifiedFields {
            inner: self.model().fields.iter().zip(self.states.iter()),
        }
    }

    /// Whether `name` is specified (value, null, or explicitly set list).
    /// Unknown names answer `false`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldState::is_present)
    }

    /// Whether `name` is explicitly null. Unknown names answer `false`.
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldState::is_null)
    }
}
