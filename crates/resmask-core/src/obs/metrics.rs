use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for engine operations.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub resources: BTreeMap<String, ResourceCounters>,
}

///
/// EventOps
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Codec
    pub decodes: u64,
    pub decode_rejections: u64,
    pub encodes: u64,
    pub fields_decoded: u64,
    pub keys_encoded: u64,

    // Writes
    pub merges: u64,
    pub creates: u64,
    pub fields_merged: u64,
    pub fields_defaulted: u64,

    // Reads
    pub projections: u64,
    pub fields_projected: u64,

    // Lists
    pub translations: u64,
    pub query_rejections: u64,
    pub pages_served: u64,
    pub rows_served: u64,
}

///
/// ResourceCounters
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct ResourceCounters {
    pub decodes: u64,
    pub decode_rejections: u64,
    pub encodes: u64,
    pub merges: u64,
    pub creates: u64,
    pub projections: u64,
    pub translations: u64,
    pub query_rejections: u64,
    pub pages_served: u64,
    pub rows_served: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Borrow the per-resource counters for `resource`, creating them on first use.
pub(crate) fn resource_entry<'a>(
    m: &'a mut EventState,
    resource: &str,
) -> &'a mut ResourceCounters {
    m.resources.entry(resource.to_string()).or_default()
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters; `None` when nothing was recorded.
    pub counters: Option<EventState>,
    /// Per-resource counters with derived averages.
    pub resource_counters: Vec<ResourceSummary>,
}

///
/// ResourceSummary
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct ResourceSummary {
    pub name: String,
    pub decodes: u64,
    pub decode_rejections: u64,
    pub encodes: u64,
    pub merges: u64,
    pub creates: u64,
    pub projections: u64,
    pub pages_served: u64,
    pub rows_served: u64,
    pub avg_rows_per_page: f64,
}

/// Build a metrics report from the in-memory counters.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let resource_counters = snap
        .resources
        .iter()
        .map(|(name, c)| ResourceSummary {
            name: name.clone(),
            decodes: c.decodes,
            decode_rejections: c.decode_rejections,
            encodes: c.encodes,
            merges: c.merges,
            creates: c.creates,
            projections: c.projections,
            pages_served: c.pages_served,
            rows_served: c.rows_served,
            avg_rows_per_page: if c.pages_served > 0 {
                c.rows_served as f64 / c.pages_served as f64
            } else {
                0.0
            },
        })
        .collect();

    let counters = if snap.resources.is_empty() {
        None
    } else {
        Some(snap)
    };

    EventReport {
        counters,
        resource_counters,
    }
}
