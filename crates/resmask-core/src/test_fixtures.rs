//! Shared resource models for unit tests.

use crate::{
    model::{
        Backing, FieldModel,
        field::{FieldDefault, FieldKind},
        resource::ResourceModel,
    },
    value::Value,
};

pub(crate) const STATUS: FieldKind = FieldKind::Enum {
    path: "fixtures::Status",
    variants: &["ACTIVE", "SUSPENDED", "DELETED"],
};

fn default_active() -> Value {
    Value::Bool(true)
}

/// `User{id, nickname(nullable), comments(repeated)}`
pub(crate) static USER: ResourceModel = ResourceModel {
    path: "fixtures::User",
    name: "users",
    backing: Backing::Table,
    fields: &[
        FieldModel::generated("id", FieldKind::Text),
        FieldModel::nullable("nickname", FieldKind::Text),
        FieldModel::repeated("comments", FieldKind::Text),
    ],
};

/// Update request message for users; `id` is loosely typed as nullable.
pub(crate) static USER_UPDATE: ResourceModel = ResourceModel {
    path: "fixtures::UserUpdate",
    name: "users_update",
    backing: Backing::Table,
    fields: &[
        FieldModel::nullable("id", FieldKind::Text),
        FieldModel::nullable("nickname", FieldKind::Text),
        FieldModel::repeated("comments", FieldKind::Text),
        FieldModel::nullable("legacy_flag", FieldKind::Bool),
    ],
};

pub(crate) static ACCOUNT: ResourceModel = ResourceModel {
    path: "fixtures::Account",
    name: "accounts",
    backing: Backing::Table,
    fields: &[
        FieldModel::generated("id", FieldKind::Uint),
        FieldModel::required("owner", FieldKind::Text),
        FieldModel::required("status", STATUS),
        FieldModel::nullable("age", FieldKind::Int),
        FieldModel::nullable("score", FieldKind::Float64),
        FieldModel::required("active", FieldKind::Bool)
            .with_default(FieldDefault::Value(default_active)),
        FieldModel::repeated("tags", FieldKind::Text),
        FieldModel::repeated("flags", STATUS),
    ],
};

pub(crate) static ACCOUNT_SUMMARY: ResourceModel = ResourceModel {
    path: "fixtures::AccountSummary",
    name: "account_summaries",
    backing: Backing::View,
    fields: &[
        FieldModel::generated("id", FieldKind::Uint),
        FieldModel::required("owner", FieldKind::Text),
        FieldModel::required("status", STATUS),
        FieldModel::nullable("age", FieldKind::Int),
        FieldModel::repeated("tags", FieldKind::Text),
    ],
};
