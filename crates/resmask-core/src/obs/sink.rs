//! Metrics sink boundary.
//!
//! Engine components MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{model::Backing, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    // Innermost sink installed by `with_metrics_sink` on this thread.
    static ACTIVE_SINK: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug)]
pub enum MetricsEvent {
    Decode {
        resource: &'static str,
        fields: u64,
    },
    DecodeRejected {
        resource: &'static str,
    },
    Encode {
        resource: &'static str,
        keys: u64,
    },
    Merge {
        resource: &'static str,
        fields: u64,
    },
    Create {
        resource: &'static str,
        defaulted: u64,
    },
    Project {
        resource: &'static str,
        selected: u64,
    },
    Translate {
        resource: &'static str,
        backing: Backing,
    },
    QueryRejected {
        resource: &'static str,
    },
    PageServed {
        resource: &'static str,
        rows: u64,
        last: bool,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the global metrics state.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Decode { resource, fields } => metrics::with_state_mut(|m| {
                m.ops.decodes = m.ops.decodes.saturating_add(1);
                m.ops.fields_decoded = m.ops.fields_decoded.saturating_add(fields);
                let entry = metrics::resource_entry(m, resource);
                entry.decodes = entry.decodes.saturating_add(1);
            }),

            MetricsEvent::DecodeRejected { resource } => metrics::with_state_mut(|m| {
                m.ops.decode_rejections = m.ops.decode_rejections.saturating_add(1);
                let entry = metrics::resource_entry(m, resource);
                entry.decode_rejections = entry.decode_rejections.saturating_add(1);
            }),

            MetricsEvent::Encode { resource, keys } => metrics::with_state_mut(|m| {
                m.ops.encodes = m.ops.encodes.saturating_add(1);
                m.ops.keys_encoded = m.ops.keys_encoded.saturating_add(keys);
                let entry = metrics::resource_entry(m, resource);
                entry.encodes = entry.encodes.saturating_add(1);
            }),

            MetricsEvent::Merge { resource, fields } => metrics::with_state_mut(|m| {
                m.ops.merges = m.ops.merges.saturating_add(1);
                m.ops.fields_merged = m.ops.fields_merged.saturating_add(fields);
                let entry = metrics::resource_entry(m, resource);
                entry.merges = entry.merges.saturating_add(1);
            }),

            MetricsEvent::Create {
                resource,
                defaulted,
            } => metrics::with_state_mut(|m| {
                m.ops.creates = m.ops.creates.saturating_add(1);
                m.ops.fields_defaulted = m.ops.fields_defaulted.saturating_add(defaulted);
                let entry = metrics::resource_entry(m, resource);
                entry.creates = entry.creates.saturating_add(1);
            }),

            MetricsEvent::Project { resource, selected } => metrics::with_state_mut(|m| {
                m.ops.projections = m.ops.projections.saturating_add(1);
                m.ops.fields_projected = m.ops.fields_projected.saturating_add(selected);
                let entry = metrics::resource_entry(m, resource);
                entry.projections = entry.projections.saturating_add(1);
            }),

            MetricsEvent::Translate { resource, .. } => metrics::with_state_mut(|m| {
                m.ops.translations = m.ops.translations.saturating_add(1);
                let entry = metrics::resource_entry(m, resource);
                entry.translations = entry.translations.saturating_add(1);
            }),

            MetricsEvent::QueryRejected { resource } => metrics::with_state_mut(|m| {
                m.ops.query_rejections = m.ops.query_rejections.saturating_add(1);
                let entry = metrics::resource_entry(m, resource);
                entry.query_rejections = entry.query_rejections.saturating_add(1);
            }),

            MetricsEvent::PageServed { resource, rows, .. } => metrics::with_state_mut(|m| {
                m.ops.pages_served = m.ops.pages_served.saturating_add(1);
                m.ops.rows_served = m.ops.rows_served.saturating_add(rows);
                let entry = metrics::resource_entry(m, resource);
                entry.pages_served = entry.pages_served.saturating_add(1);
                entry.rows_served = entry.rows_served.saturating_add(rows);
            }),
        }
    }
}

/// Route one event to the active sink.
pub(crate) fn record(event: MetricsEvent) {
    // Clone out of the slot so a sink may install its own override.
    match ACTIVE_SINK.with(|slot| slot.borrow().clone()) {
        Some(sink) => sink.record(event),
        None => GlobalMetricsSink.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state on the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Send every event recorded on this thread to `sink` while `f` runs.
///
/// Overrides nest; the previous sink comes back when `f` returns or unwinds.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Restore(Option<Rc<dyn MetricsSink>>);

    impl Drop for Restore {
        fn drop(&mut self) {
            let previous = self.0.take();
            ACTIVE_SINK.with(|slot| slot.replace(previous));
        }
    }

    let _restore = Restore(ACTIVE_SINK.with(|slot| slot.replace(Some(sink))));

    f()
}

///
/// TESTS
///
