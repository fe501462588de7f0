use crate::{
    codec::wire::{WireMessage, WireValue, null_key, set_key, value_key},
    model::{FieldModel, field::Cardinality},
    resource::{FieldState, FieldValue, Resource},
    value::Value,
};

pub(super) fn encode_resource(resource: &Resource) -> WireMessage {
    let mut message = WireMessage::new();
    for (field, state) in resource.fields() {
        encode_field(field, state, &mut message);
    }

    message
}

/// Write the wire keys for one field. Unspecified fields write nothing.
pub(super) fn encode_field(field: &FieldModel, state: &FieldState, out: &mut WireMessage) {
    match state {
        FieldState::Unspecified => {}
        FieldState::Null => {
            out.insert(null_key(field), WireValue::Bool(true));
        }
        FieldState::Specified(FieldValue::Scalar(value)) => {
            let key = match field.cardinality {
                Cardinality::Nullable => value_key(field),
                Cardinality::Scalar | Cardinality::Repeated => field.name.to_string(),
            };
            out.insert(key, encode_value(value));
        }
        FieldState::Specified(FieldValue::List(list)) => {
            if !list.is_empty() {
                out.insert(
                    field.name,
                    WireValue::List(list.items().iter().map(encode_value).collect()),
                );
            }
            if list.explicitly_set() {
                out.insert(set_key(field), WireValue::Bool(true));
            }
        }
    }
}

fn encode_value(value: &Value) -> WireValue {
    match value {
        Value::Bool(v) => WireValue::Bool(*v),
        Value::Int(v) => WireValue::Int(*v),
        Value::Uint(v) => WireValue::Uint(*v),
        Value::Float64(v) => WireValue::Float(v.get()),
        Value::Text(v) | Value::Enum(v) => WireValue::Text(v.clone()),
    }
}
