//! Module: obs
//! Responsibility: runtime telemetry (counters, spans) and the sink boundary.
//! Does not own: log output; structured logs go straight through `tracing`.
//! Boundary: query and storage code record `MetricsEvent`s only via `sink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EntitySummary, EventOps, EventPerf, EventReport, EventState};
pub use sink::{
    ExecKind, MetricsEvent, MetricsSink, PlanKind, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
