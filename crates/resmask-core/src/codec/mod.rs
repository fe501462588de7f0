//! Tri-state field codec.
//!
//! Maps transport messages onto resources and back. Each field is decoded
//! independently of the others; a resource is only produced once every
//! field decoded cleanly.

mod decode;
mod encode;
mod error;
pub mod wire;


use crate::{
    model::{FieldModel, resource::ResourceModel},
    obs::sink::{MetricsEvent, record},
    resource::{FieldState, Resource},
};
use serde::{Deserialize, Serialize};

// re-exports
pub use error::{DecodeError, DecodeErrorReason};
pub use wire::{WireMessage, WireValue};

///
/// UnknownFieldPolicy
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Keys no field claims are skipped (proto3 behaviour).
    #[default]
    Ignore,
    /// Keys no field claims fail the decode.
    Reject,
}

///
/// CodecPolicy
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CodecPolicy {
    pub unknown_fields: UnknownFieldPolicy,
}

/// Decode a whole message against `model`.
pub fn decode(
    model: &'static ResourceModel,
    message: &WireMessage,
    policy: &CodecPolicy,
) -> Result<Resource, DecodeError> {
    match decode::decode_resource(model, message, policy) {
        Ok(resource) => {
            let fields = resource.specified_fields().count();
            log::debug!(
                "decoded {fields} field(s) of '{}' from {} wire key(s)",
                model.name,
                message.len()
            );
            record(MetricsEvent::Decode {
                resource: model.name,
                fields: fields as u64,
            });

            Ok(resource)
        }
        Err(err) => {
            log::debug!("decode of '{}' rejected: {err}", model.name);
            record(MetricsEvent::DecodeRejected {
                resource: model.name,
            });

            Err(err)
        }
    }
}

/// Decode `message` and replace `target` with the result.
///
/// `target` is untouched unless every field decoded.
pub fn decode_into(
    target: &mut Resource,
    message: &WireMessage,
    policy: &CodecPolicy,
) -> Result<(), DecodeError> {
    *target = decode(target.model(), message, policy)?;

    Ok(())
}

/// Decode the state of a single field.
pub fn decode_field(field: &FieldModel, message: &WireMessage) -> Result<FieldState, DecodeError> {
    decode::decode_field(field, message)
}

/// Encode a resource into its transport message.
#[must_use]
pub fn encode(resource: &Resource) -> WireMessage {
    let message = encode::encode_resource(resource);
    record(MetricsEvent::Encode {
        resource: resource.model().name,
        keys: message.len() as u64,
    });

    message
}

/// Encode the state of a single field into a standalone message.
#[must_use]
pub fn encode_field(field: &FieldModel, state: &FieldState) -> WireMessage {
    let mut message = WireMessage::new();
    encode::encode_field(field, state, &mut message);

    message
}
