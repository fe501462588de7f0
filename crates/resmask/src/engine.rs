//! Request orchestration over registered resource models.
//!
//! Each entry point is a straight pipeline: decode the wire message, run the
//! component (merge, create, mask, translate), encode the result. Nothing
//! is persisted here; stored rows come in and updated rows go out.

use crate::{config::EngineConfig, error::Error};
use resmask_core::{
    codec::{self, WireMessage},
    mask::{self, FieldMask, Polarity},
    merge,
    model::resource::ResourceModel,
    query::{self, ListQuery, QueryDescriptor},
    resource::Resource,
    store::{self, ListStore},
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// EngineError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EngineError {
    #[error("resource '{name}' is not registered")]
    UnknownResource { name: String },

    #[error("resource '{name}' is already registered")]
    DuplicateResource { name: &'static str },
}

///
/// ListResponse
///

#[derive(Clone, Debug, PartialEq)]
pub struct ListResponse {
    pub items: Vec<WireMessage>,
    /// Empty on the last page.
    pub next_page_token: String,
    pub total_size: Option<u64>,
}

///
/// Engine
///

#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    models: BTreeMap<&'static str, &'static ResourceModel>,
}

impl Engine {
    /// Build an engine over `config`, which must pass `EngineConfig::validate`.
    pub fn new(config: EngineConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            models: BTreeMap::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    //
    // Registry
    //

    /// Validate `model` and make it addressable by name.
    pub fn register(&mut self, model: &'static ResourceModel) -> Result<(), Error> {
        model.validate()?;
        if self.models.contains_key(model.name) {
            return Err(EngineError::DuplicateResource { name: model.name }.into());
        }

        log::debug!(
            "registered resource '{}' ({}, {} field(s))",
            model.name,
            model.backing,
            model.fields.len()
        );
        self.models.insert(model.name, model);

        Ok(())
    }

    pub fn with(mut self, model: &'static ResourceModel) -> Result<Self, Error> {
        self.register(model)?;
        Ok(self)
    }

    pub fn model(&self, resource: &str) -> Result<&'static ResourceModel, Error> {
        self.models.get(resource).copied().ok_or_else(|| {
            EngineError::UnknownResource {
                name: resource.to_string(),
            }
            .into()
        })
    }

    pub fn resources(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.keys().copied()
    }

    //
    // Codec
    //

    pub fn decode(&self, resource: &str, message: &WireMessage) -> Result<Resource, Error> {
        let model = self.model(resource)?;

        Ok(codec::decode(model, message, &self.config.codec)?)
    }

    //
    // Writes
    //

    /// Build a new row from a create request, filling declared defaults.
    pub fn create(&self, resource: &str, input: &WireMessage) -> Result<WireMessage, Error> {
        let model = self.model(resource)?;
        let input = codec::decode(model, input, &self.config.codec)?;
        let created = merge::create(model, &input)?;

        Ok(codec::encode(&created))
    }

    /// Apply a partial update to a stored row.
    pub fn update(
        &self,
        resource: &str,
        stored: &WireMessage,
        patch: &WireMessage,
    ) -> Result<WireMessage, Error> {
        self.update_from(resource, stored, resource, patch)
    }

    /// Apply a partial update decoded against a different request model.
    ///
    /// Patch fields are matched to the stored resource by name.
    pub fn update_from(
        &self,
        resource: &str,
        stored: &WireMessage,
        patch_resource: &str,
        patch: &WireMessage,
    ) -> Result<WireMessage, Error> {
        let stored = self.decode(resource, stored)?;
        let patch = self.decode(patch_resource, patch)?;
        let merged = merge::merge(&stored, &patch)?;

        Ok(codec::encode(&merged))
    }

    //
    // Reads
    //

    /// Project a stored row for a read request.
    pub fn get(
        &self,
        resource: &str,
        stored: &WireMessage,
        mask: &FieldMask,
        polarity: Polarity,
    ) -> Result<WireMessage, Error> {
        let stored = self.decode(resource, stored)?;
        let projected = mask::project_fields(&stored, mask, polarity);

        Ok(codec::encode(&projected))
    }

    /// Validate a list request without running it.
    pub fn translate(&self, resource: &str, query: &ListQuery) -> Result<QueryDescriptor, Error> {
        let model = self.model(resource)?;

        Ok(query::translate(model, query, &self.config.list)?)
    }

    /// Translate, run against `store`, then project each row.
    pub fn list<S: ListStore + ?Sized>(
        &self,
        store: &S,
        resource: &str,
        query: &ListQuery,
        mask: &FieldMask,
        polarity: Polarity,
    ) -> Result<ListResponse, Error> {
        let model = self.model(resource)?;
        let descriptor = query::translate(model, query, &self.config.list)?;
        let page = store::fetch_page(store, model, &descriptor, &self.config.codec)?;

        let items = page
            .resources
            .iter()
            .map(|row| codec::encode(&mask::project_fields(row, mask, polarity)))
            .collect();

        Ok(ListResponse {
            items,
            next_page_token: page.next_page_token,
            total_size: page.total_size,
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ErrorOrigin, QueryErrorKind};
    use resmask_core::{
        codec::WireValue,
        model::{Backing, FieldModel, field::FieldKind},
        query::ListPolicy,
    };

    static NOTE: ResourceModel = ResourceModel {
        path: "engine_tests::Note",
        name: "notes",
        backing: Backing::Table,
        fields: &[
            FieldModel::generated("id", FieldKind::Uint),
            FieldModel::required("title", FieldKind::Text),
            FieldModel::nullable("body", FieldKind::Text),
            FieldModel::nullable(
                "mood",
                FieldKind::Enum {
                    path: "engine_tests::Mood",
                    variants: &["CALM", "TENSE"],
                },
            ),
        ],
    };

    static BROKEN: ResourceModel = ResourceModel {
        path: "engine_tests::Broken",
        name: "broken",
        backing: Backing::Table,
        fields: &[
            FieldModel::required("a", FieldKind::Int),
            FieldModel::required("a", FieldKind::Int),
        ],
    };

    fn engine() -> Engine {
        Engine::default().with(&NOTE).unwrap()
    }

    fn text(value: &str) -> WireValue {
        WireValue::Text(value.to_string())
    }

    #[test]
    fn registration_rejects_duplicates_and_invalid_models() {
        let mut engine = engine();

        let err = engine.register(&NOTE).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Model);
        assert_eq!(err.origin, ErrorOrigin::Engine);

        let err = engine.register(&BROKEN).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Model);
        assert_eq!(err.origin, ErrorOrigin::Model);

        assert_eq!(engine.resources().collect::<Vec<_>>(), ["notes"]);
    }

    #[test]
    fn unknown_resources_are_reported() {
        let err = engine()
            .create("tasks", &WireMessage::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownResource);
    }

    #[test]
    fn create_then_update_then_get() {
        let engine = engine();

        let created = engine
            .create("notes", &WireMessage::new().with("title", text("hello")))
            .unwrap();
        assert_eq!(created.get("body_null"), Some(&WireValue::Bool(true)));
        assert_eq!(created.get("id"), None);

        let stored = created.with("id", WireValue::Uint(7));
        let patch = WireMessage::new().with("body_", text("world"));
        let updated = engine.update("notes", &stored, &patch).unwrap();
        assert_eq!(updated.get("title"), Some(&text("hello")));
        assert_eq!(updated.get("body_"), Some(&text("world")));

        let got = engine
            .get("notes", &updated, &FieldMask::parse("id, body"), Polarity::Positive)
            .unwrap();
        assert_eq!(got.get("title"), None);
        assert_eq!(got.get("id"), Some(&WireValue::Uint(7)));
        assert_eq!(got.get("body_"), Some(&text("world")));
    }

    #[test]
    fn component_errors_map_to_public_kinds() {
        let engine = engine();

        let err = engine
            .create("notes", &WireMessage::new().with("title", WireValue::Int(1)))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert_eq!(err.origin, ErrorOrigin::Codec);

        let err = engine.create("notes", &WireMessage::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.origin, ErrorOrigin::Merge);

        let err = engine
            .translate("notes", &ListQuery::new().filter("COUNT(*) = 1"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::Syntax));

        let err = engine
            .translate("notes", &ListQuery::new().page_token("00"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Cursor);
        assert_eq!(err.origin, ErrorOrigin::Cursor);
    }

    #[test]
    fn unknown_enum_literals_in_filters_are_validation_errors() {
        let engine = engine();

        let err = engine
            .translate("notes", &ListQuery::new().filter("mood = 'BOGUS'"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.origin, ErrorOrigin::Query);
        assert!(err.message.contains("BOGUS"));

        engine
            .translate("notes", &ListQuery::new().filter("mood = 'CALM'"))
            .unwrap();
    }

    #[test]
    fn engine_rejects_inconsistent_config() {
        let config = EngineConfig {
            list: ListPolicy {
                default_page_size: 20,
                max_page_size: 10,
                ..ListPolicy::default()
            },
            ..EngineConfig::default()
        };

        let err = Engine::new(config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert_eq!(err.origin, ErrorOrigin::Config);

        Engine::new(EngineConfig::default()).unwrap();
    }

    #[test]
    fn public_errors_serialize() {
        let err = engine()
            .translate("notes", &ListQuery::new().filter("rating > 3"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::UnsupportedField));

        let json = serde_json::to_string(&err).unwrap();
        let back: Error = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
