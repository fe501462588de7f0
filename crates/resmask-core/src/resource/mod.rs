//! Resource instances: an ordered field-name → tri-state mapping bound to a
//! static model.

mod presence;
mod state;

#[cfg(test)]
mod tests;

use crate::{
    model::{FieldModel, resource::ResourceModel},
    validate::{ValidationError, check_state},
};
use std::fmt;

// re-exports
pub use presence::{SpecifiedField, SpecifiedFields};
pub use state::{FieldState, FieldValue, ListValue};

///
/// Resource
///
/// One transient message instance. Field states are stored in model order
/// and validated against the model on every write.
///

#[derive(Clone)]
pub struct Resource {
    model: &'static ResourceModel,
    states: Vec<FieldState>,
}

impl Resource {
    /// Construct a resource with every field unspecified.
    #[must_use]
    pub fn new(model: &'static ResourceModel) -> Self {
        Self {
            model,
            states: vec![FieldState::Unspecified; model.fields.len()],
        }
    }

    #[must_use]
    pub const fn model(&self) -> &'static ResourceModel {
        self.model
    }

    /// Current state of `name`, or `None` if the model has no such field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldState> {
        self.model
            .field_index(name)
            .map(|index| &self.states[index])
    }

    /// Set one field, validating the state against the model.
    pub fn set(&mut self, name: &str, state: FieldState) -> Result<(), ValidationError> {
        let index = self.model.field_index(name).ok_or_else(|| {
            ValidationError::UnknownField {
                resource: self.model.name.to_string(),
                field: name.to_string(),
            }
        })?;
        check_state(&self.model.fields[index], &state)?;
        self.states[index] = state;

        Ok(())
    }

    /// Builder form of [`Resource::set`].
    pub fn with(mut self, name: &str, state: FieldState) -> Result<Self, ValidationError> {
        self.set(name, state)?;

        Ok(self)
    }

    /// Reset one field to unspecified. Unknown names are a no-op.
    pub fn clear(&mut self, name: &str) {
        if let Some(index) = self.model.field_index(name) {
            self.states[index] = FieldState::Unspecified;
        }
    }

    /// Every field of the model paired with its current state, in model order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldModel, &FieldState)> + '_ {
        self.model.fields.iter().zip(self.states.iter())
    }

    /// Returns true when no field carries presence information.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specified_fields().next().is_none()
    }

    pub(crate) const fn from_states(
        model: &'static ResourceModel,
        states: Vec<FieldState>,
    ) -> Self {
        Self { model, states }
    }

    pub(crate) fn into_states(self) -> Vec<FieldState> {
        self.states
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.model.same_as(other.model) && self.states == other.states
    }
}

impl Eq for Resource {}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, state) in self.fields() {
            if !state.is_unspecified() {
                map.entry(&field.name, state);
            }
        }

        map.finish()
    }
}
