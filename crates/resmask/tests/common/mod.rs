//! Shared models and an in-memory list store for integration tests.

#![allow(dead_code)]

use resmask::{core::query::QueryDescriptor, prelude::*};
use std::cell::{Cell, RefCell};

pub const STATUS: FieldKind = FieldKind::Enum {
    path: "common::Status",
    variants: &["ACTIVE", "SUSPENDED", "DELETED"],
};

fn default_status() -> Value {
    Value::enum_member("ACTIVE")
}

pub static USER: ResourceModel = ResourceModel {
    path: "common::User",
    name: "users",
    backing: Backing::Table,
    fields: &[
        FieldModel::required("id", FieldKind::Text),
        FieldModel::nullable("nickname", FieldKind::Text),
        FieldModel::repeated("comments", FieldKind::Text),
    ],
};

/// Older request message for users, without `comments`.
pub static USER_PATCH_V1: ResourceModel = ResourceModel {
    path: "common::UserPatchV1",
    name: "users_patch_v1",
    backing: Backing::Table,
    fields: &[FieldModel::nullable("nickname", FieldKind::Text)],
};

pub static ACCOUNT: ResourceModel = ResourceModel {
    path: "common::Account",
    name: "accounts",
    backing: Backing::Table,
    fields: &[
        FieldModel::generated("id", FieldKind::Uint),
        FieldModel::required("owner", FieldKind::Text),
        FieldModel::required("status", STATUS).with_default(FieldDefault::Value(default_status)),
        FieldModel::nullable("age", FieldKind::Int),
        FieldModel::nullable("score", FieldKind::Float64),
        FieldModel::required("active", FieldKind::Bool),
        FieldModel::repeated("tags", FieldKind::Text),
    ],
};

pub static ACCOUNT_SUMMARY: ResourceModel = ResourceModel {
    path: "common::AccountSummary",
    name: "account_summaries",
    backing: Backing::View,
    fields: &[
        FieldModel::generated("id", FieldKind::Uint),
        FieldModel::required("owner", FieldKind::Text),
        FieldModel::required("status", STATUS),
        FieldModel::nullable("age", FieldKind::Int),
    ],
};

#[must_use]
pub fn engine() -> Engine {
    Engine::default()
        .with(&USER)
        .and_then(|engine| engine.with(&USER_PATCH_V1))
        .and_then(|engine| engine.with(&ACCOUNT))
        .and_then(|engine| engine.with(&ACCOUNT_SUMMARY))
        .expect("fixture models should register")
}

#[must_use]
pub fn text(value: &str) -> WireValue {
    WireValue::Text(value.to_string())
}

///
/// MemoryStore
///
/// Serves stored rows in insertion order. The continuation is the big-endian
/// index of the next row; filtering is not evaluated, only recorded.
///

#[derive(Default)]
pub struct MemoryStore {
    pub rows: Vec<WireMessage>,
    pub stale: Cell<bool>,
    pub unavailable: Cell<bool>,
    pub seen: RefCell<Vec<SeenRequest>>,
}

///
/// SeenRequest
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeenRequest {
    pub filter: Option<String>,
    pub order_by: String,
    pub page_size: u32,
    pub resumed: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn accounts(count: u64) -> Self {
        let rows = (0..count)
            .map(|i| {
                WireMessage::new()
                    .with("id", WireValue::Uint(i))
                    .with("owner", text(&format!("owner-{i}")))
                    .with("status", text("ACTIVE"))
                    .with("age_", WireValue::Int(20 + i64::try_from(i).unwrap()))
                    .with("active", WireValue::Bool(i % 2 == 0))
            })
            .collect();

        Self {
            rows,
            ..Self::default()
        }
    }
}

impl ListStore for MemoryStore {
    fn list(&self, descriptor: &QueryDescriptor) -> Result<StorePage, StoreError> {
        self.seen.borrow_mut().push(SeenRequest {
            filter: descriptor.filter_text(),
            order_by: descriptor.order_by_text(),
            page_size: descriptor.page_size,
            resumed: descriptor.is_continuation(),
        });

        if self.unavailable.get() {
            return Err(StoreError::Unavailable {
                reason: "replica offline".to_string(),
            });
        }
        if self.stale.get() && descriptor.is_continuation() {
            return Err(StoreError::StaleCursor {
                reason: "snapshot expired".to_string(),
            });
        }

        let start = match &descriptor.resume {
            Some(bytes) => {
                let raw: [u8; 8] = bytes.as_slice().try_into().expect("8-byte continuation");
                usize::try_from(u64::from_be_bytes(raw)).unwrap()
            }
            None => usize::try_from(descriptor.offset).unwrap(),
        };
        let start = start.min(self.rows.len());
        let end = (start + descriptor.page_size as usize).min(self.rows.len());
        let resume = (end < self.rows.len()).then(|| (end as u64).to_be_bytes().to_vec());

        Ok(StorePage {
            rows: self.rows[start..end].to_vec(),
            resume,
            total_size: Some(self.rows.len() as u64),
        })
    }
}
