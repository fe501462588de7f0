//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Components never touch the counters directly; everything flows through
//! `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, ResourceCounters, ResourceSummary};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
