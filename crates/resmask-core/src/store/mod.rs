//! External list store boundary.
//!
//! The engine never executes queries. A `ListStore` receives the validated
//! descriptor and hands back wire rows plus an opaque continuation, which
//! `fetch_page` re-wraps into resources and a signed page token.


use crate::{
    codec::{self, CodecPolicy, WireMessage},
    error::Error,
    model::resource::ResourceModel,
    obs::sink::{MetricsEvent, record},
    query::QueryDescriptor,
    resource::Resource,
};
use thiserror::Error as ThisError;

///
/// ListStore
///

pub trait ListStore {
    fn list(&self, descriptor: &QueryDescriptor) -> Result<StorePage, StoreError>;
}

///
/// StorePage
/// One page of raw rows as produced by the external store.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StorePage {
    pub rows: Vec<WireMessage>,
    /// Continuation for the next page; `None` once results are exhausted.
    pub resume: Option<Vec<u8>>,
    pub total_size: Option<u64>,
}

///
/// StoreError
///
/// Failures reported by the external store. Surfaced to callers unchanged.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("stale cursor: {reason}")]
    StaleCursor { reason: String },

    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

///
/// ListPage
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListPage {
    pub resources: Vec<Resource>,
    /// Empty when there is nothing after this page.
    pub next_page_token: String,
    pub total_size: Option<u64>,
}

impl ListPage {
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.next_page_token.is_empty()
    }
}

/// Run `descriptor` against `store` and decode the returned rows.
pub fn fetch_page<S: ListStore + ?Sized>(
    store: &S,
    model: &'static ResourceModel,
    descriptor: &QueryDescriptor,
    policy: &CodecPolicy,
) -> Result<ListPage, Error> {
    let page = store.list(descriptor).inspect_err(|err| {
        log::warn!("store rejected list on '{}': {err}", model.name);
    })?;

    let resources = page
        .rows
        .iter()
        .map(|row| codec::decode(model, row, policy))
        .collect::<Result<Vec<_>, _>>()?;
    let next_page_token = descriptor.next_page_token(page.resume)?;

    let rows = resources.len() as u64;
    let last = next_page_token.is_empty();
    log::debug!(
        "served {rows} row(s) of '{}' (offset {}, last page: {last})",
        model.name,
        descriptor.offset
    );
    record(MetricsEvent::PageServed {
        resource: model.name,
        rows,
        last,
    });

    Ok(ListPage {
        resources,
        next_page_token,
        total_size: page.total_size,
    })
}
