use crate::{
    codec::{
        CodecPolicy, UnknownFieldPolicy,
        error::{DecodeError, DecodeErrorReason},
        wire::{WireMessage, WireValue, null_key, reserved_wire_keys, set_key, value_key},
    },
    model::{
        FieldModel,
        field::{Cardinality, FieldKind},
        resource::ResourceModel,
    },
    resource::{FieldState, FieldValue, ListValue, Resource},
    value::{Float64, Value},
};
use std::collections::BTreeSet;

/// Decode every field of `model` from `message`.
///
/// Fields are decoded into a fresh state vector; the resource is only
/// assembled once all of them succeeded.
pub(super) fn decode_resource(
    model: &'static ResourceModel,
    message: &WireMessage,
    policy: &CodecPolicy,
) -> Result<Resource, DecodeError> {
    if policy.unknown_fields == UnknownFieldPolicy::Reject {
        reject_unknown_keys(model, message)?;
    }

    let mut states = Vec::with_capacity(model.fields.len());
    for field in model.fields {
        states.push(decode_field(field, message)?);
    }

    Ok(Resource::from_states(model, states))
}

/// Decode one field's state from its wire keys.
pub(super) fn decode_field(
    field: &FieldModel,
    message: &WireMessage,
) -> Result<FieldState, DecodeError> {
    let null_key = null_key(field);
    let null_marker = message.get(&null_key);

    match field.cardinality {
        Cardinality::Scalar => {
            if null_marker.is_some() {
                return Err(error(field, null_key, DecodeErrorReason::NullNotAllowed));
            }

            match message.get(field.name) {
                None => Ok(FieldState::Unspecified),
                Some(raw) => decode_scalar(field, field.name, raw).map(FieldState::value),
            }
        }

        Cardinality::Nullable => {
            let value_key = value_key(field);

            match (message.get(&value_key), null_marker) {
                (None, None) => Ok(FieldState::Unspecified),
                (Some(_), Some(_)) => Err(error(
                    field,
                    null_key,
                    DecodeErrorReason::ConflictingPresence,
                )),
                (None, Some(WireValue::Bool(true))) => Ok(FieldState::Null),
                (None, Some(_)) => Err(error(
                    field,
                    null_key,
                    DecodeErrorReason::InvalidNullMarker,
                )),
                (Some(raw), None) => decode_scalar(field, &value_key, raw).map(FieldState::value),
            }
        }

        Cardinality::Repeated => {
            if null_marker.is_some() {
                return Err(error(field, null_key, DecodeErrorReason::NullNotAllowed));
            }

            let set_key = set_key(field);
            let explicitly_set = match message.get(&set_key) {
                None => false,
                Some(WireValue::Bool(flag)) => *flag,
                Some(_) => return Err(error(field, set_key, DecodeErrorReason::InvalidSetFlag)),
            };

            let items = match message.get(field.name) {
                None => Vec::new(),
                Some(WireValue::List(raw_items)) => {
                    let mut items = Vec::with_capacity(raw_items.len());
                    for (index, raw) in raw_items.iter().enumerate() {
                        let key = format!("{}[{index}]", field.name);
                        items.push(decode_scalar(field, &key, raw)?);
                    }
                    items
                }
                Some(_) => {
                    return Err(error(field, field.name, DecodeErrorReason::ExpectedList));
                }
            };

            // A non-empty list is specified whatever the flag says; the flag
            // only disambiguates the empty list.
            if items.is_empty() && !explicitly_set {
                Ok(FieldState::Unspecified)
            } else {
                Ok(FieldState::Specified(FieldValue::List(ListValue::new(
                    items,
                    explicitly_set,
                ))))
            }
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn decode_scalar(field: &FieldModel, key: &str, raw: &WireValue) -> Result<Value, DecodeError> {
    let mismatch = || {
        error(
            field,
            key,
            DecodeErrorReason::TypeMismatch {
                expected: field.kind.label(),
                found: raw.label(),
            },
        )
    };
    let out_of_range = || {
        error(
            field,
            key,
            DecodeErrorReason::IntegerOutOfRange {
                expected: field.kind.label(),
            },
        )
    };

    match (&field.kind, raw) {
        (_, WireValue::List(_)) => Err(error(field, key, DecodeErrorReason::ExpectedScalar)),

        (FieldKind::Bool, WireValue::Bool(v)) => Ok(Value::Bool(*v)),

        (FieldKind::Int, WireValue::Int(v)) => Ok(Value::Int(*v)),
        (FieldKind::Int, WireValue::Uint(v)) => {
            i64::try_from(*v).map(Value::Int).map_err(|_| out_of_range())
        }

        (FieldKind::Uint, WireValue::Uint(v)) => Ok(Value::Uint(*v)),
        (FieldKind::Uint, WireValue::Int(v)) => {
            u64::try_from(*v).map(Value::Uint).map_err(|_| out_of_range())
        }

        (FieldKind::Float64, WireValue::Float(v)) => Float64::try_new(*v)
            .map(Value::Float64)
            .ok_or_else(|| error(field, key, DecodeErrorReason::NonFiniteFloat)),
        (FieldKind::Float64, WireValue::Int(v)) => Float64::try_new(*v as f64)
            .map(Value::Float64)
            .ok_or_else(|| error(field, key, DecodeErrorReason::NonFiniteFloat)),
        (FieldKind::Float64, WireValue::Uint(v)) => Float64::try_new(*v as f64)
            .map(Value::Float64)
            .ok_or_else(|| error(field, key, DecodeErrorReason::NonFiniteFloat)),

        (FieldKind::Text, WireValue::Text(v)) => Ok(Value::Text(v.clone())),

        (FieldKind::Enum { variants, .. }, WireValue::Text(member)) => {
            if variants.contains(&member.as_str()) {
                Ok(Value::Enum(member.clone()))
            } else {
                Err(error(
                    field,
                    key,
                    DecodeErrorReason::UnknownEnumMember {
                        member: member.clone(),
                    },
                ))
            }
        }

        _ => Err(mismatch()),
    }
}

fn reject_unknown_keys(model: &ResourceModel, message: &WireMessage) -> Result<(), DecodeError> {
    let known: BTreeSet<String> = model.fields.iter().flat_map(reserved_wire_keys).collect();

    match message.keys().find(|key| !known.contains(*key)) {
        Some(key) => Err(DecodeError::new(key, key, DecodeErrorReason::UnknownField)),
        None => Ok(()),
    }
}

fn error(field: &FieldModel, key: impl Into<String>, reason: DecodeErrorReason) -> DecodeError {
    DecodeError::new(field.name, key, reason)
}
