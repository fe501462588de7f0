//! Partial update merging.
//!
//! Writes carry only the fields the caller wants to change. The merger
//! folds such a partial resource onto a stored one; the result is returned
//! and persisting it is the caller's business.


use crate::{
    model::{field::FieldDefault, resource::ResourceModel},
    obs::sink::{MetricsEvent, record},
    resource::{FieldState, FieldValue, ListValue, Resource},
    validate::{ValidationError, check_state, check_value},
};

/// Merge `patch` onto `stored` and return the updated resource.
///
/// Patch fields are matched to the stored model by name:
/// - unspecified fields leave the stored state untouched
/// - null clears a nullable field
/// - scalars and lists replace the stored state wholesale (lists are
///   never appended to)
///
/// `stored` is never modified; on error nothing is applied.
pub fn merge(stored: &Resource, patch: &Resource) -> Result<Resource, ValidationError> {
    let model = stored.model();
    let mut states = stored.clone().into_states();
    let changed = apply_patch(model, &mut states, patch)?;

    log::debug!(
        "merged {changed} field(s) of '{}' onto '{}'",
        patch.model().name,
        model.name
    );
    record(MetricsEvent::Merge {
        resource: model.name,
        fields: changed,
    });

    Ok(Resource::from_states(model, states))
}

/// Build a resource of `model` from a create request.
///
/// Specified fields of `input` are taken as-is; every other field falls
/// back to its declared default. Required fields without a value fail.
pub fn create(
    model: &'static ResourceModel,
    input: &Resource,
) -> Result<Resource, ValidationError> {
    let mut states = vec![FieldState::Unspecified; model.fields.len()];
    apply_patch(model, &mut states, input)?;

    let mut defaulted = 0_u64;
    for (field, state) in model.fields.iter().zip(states.iter_mut()) {
        if state.is_present() {
            continue;
        }

        *state = match field.default {
            FieldDefault::Required => {
                return Err(ValidationError::MissingRequired {
                    field: field.name.to_string(),
                });
            }
            FieldDefault::Generated => continue,
            FieldDefault::Null => FieldState::Null,
            FieldDefault::EmptyList => {
                FieldState::Specified(FieldValue::List(ListValue::cleared()))
            }
            FieldDefault::Value(make) => {
                let value = make();
                check_value(field, &value)?;
                FieldState::Specified(FieldValue::Scalar(value))
            }
        };
        check_state(field, state)?;
        defaulted += 1;
    }

    log::debug!("created '{}' with {defaulted} defaulted field(s)", model.name);
    record(MetricsEvent::Create {
        resource: model.name,
        defaulted,
    });

    Ok(Resource::from_states(model, states))
}

/// Fold the present fields of `patch` into `states` (laid out per `model`).
/// Returns how many fields were written.
fn apply_patch(
    model: &'static ResourceModel,
    states: &mut [FieldState],
    patch: &Resource,
) -> Result<u64, ValidationError> {
    let mut staged = Vec::new();

    for entry in patch.specified_fields() {
        let index = model
            .field_index(entry.name())
            .ok_or_else(|| ValidationError::UnknownField {
                resource: model.name.to_string(),
                field: entry.name().to_string(),
            })?;
        check_state(&model.fields[index], entry.state())?;
        staged.push((index, entry.state().clone()));
    }

    let changed = staged.len() as u64;
    for (index, state) in staged {
        states[index] = state;
    }

    Ok(changed)
}
