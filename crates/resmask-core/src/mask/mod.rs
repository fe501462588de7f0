//! Field mask evaluation.
//!
//! A mask is a resource used as a sieve: which of its fields are specified
//! decides what is kept, their values are never read.

#[cfg(test)]
mod tests;

use crate::{
    obs::sink::{MetricsEvent, record},
    resource::{FieldState, Resource},
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

///
/// Polarity
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Keep exactly the masked fields.
    #[default]
    Positive,
    /// Keep every field except the masked ones.
    Negative,
}

///
/// FieldMask
///
/// Set of selected field names. Names the projected resource does not
/// declare are carried along and ignored at projection time.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct FieldMask(BTreeSet<String>);

impl FieldMask {
    /// Mask selecting the specified fields of `mask`.
    #[must_use]
    pub fn from_resource(mask: &Resource) -> Self {
        Self(
            mask.specified_fields()
                .map(|field| field.name().to_string())
                .collect(),
        )
    }

    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Parse a comma-separated path list (`fields=id,nickname`).
    /// Blank segments are skipped.
    #[must_use]
    pub fn parse(paths: &str) -> Self {
        Self::from_names(
            paths
                .split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty()),
        )
    }

    /// Whether `name` survives a projection through this mask.
    ///
    /// An empty mask selects every field regardless of polarity.
    #[must_use]
    pub fn selects(&self, name: &str, polarity: Polarity) -> bool {
        if self.0.is_empty() {
            return true;
        }

        let listed = self.0.contains(name);
        match polarity {
            Polarity::Positive => listed,
            Polarity::Negative => !listed,
        }
    }
}

/// Project `resource` through the specified fields of `mask`.
#[must_use]
pub fn project(resource: &Resource, mask: &Resource, polarity: Polarity) -> Resource {
    project_fields(resource, &FieldMask::from_resource(mask), polarity)
}

/// Project `resource` through a name-based mask.
///
/// Selected fields are copied verbatim; everything else becomes unspecified.
/// The input is never modified.
#[must_use]
pub fn project_fields(resource: &Resource, mask: &FieldMask, polarity: Polarity) -> Resource {
    let model = resource.model();
    let states: Vec<FieldState> = resource
        .fields()
        .map(|(field, state)| {
            if mask.selects(field.name, polarity) {
                state.clone()
            } else {
                FieldState::Unspecified
            }
        })
        .collect();

    let projected = Resource::from_states(model, states);
    let selected = projected.specified_fields().count();
    log::debug!(
        "projected '{}' through a {polarity:?} mask of {} name(s): {selected} field(s) kept",
        model.name,
        mask.len()
    );
    record(MetricsEvent::Project {
        resource: model.name,
        selected: selected as u64,
    });

    projected
}
