//! Metrics sink boundary.
//!
//! Executor and service code MUST NOT touch `obs::metrics` directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
use crate::{obs::metrics, traits::EntityKind};
use std::{cell::RefCell, marker::PhantomData, rc::Rc, time::Instant};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// ExecKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecKind {
    Filter,
    Count,
    Save,
    Delete,
}

///
/// PlanKind
/// Whether a query carried a predicate or scanned the whole entity.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanKind {
    Filtered,
    FullScan,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        kind: ExecKind,
        entity_path: &'static str,
    },
    ExecFinish {
        kind: ExecKind,
        entity_path: &'static str,
        rows_touched: u64,
        elapsed_micros: u64,
    },
    CompileFailed {
        entity_path: &'static str,
    },
    TypeMismatch {
        entity_path: &'static str,
    },
    Plan {
        kind: PlanKind,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink writing into the thread-local counters.
/// Used whenever no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { kind, entity_path } => {
                metrics::with_state_mut(|m| {
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    match kind {
                        ExecKind::Filter => {
                            m.ops.filter_calls = m.ops.filter_calls.saturating_add(1);
                            entry.filter_calls = entry.filter_calls.saturating_add(1);
                        }
                        ExecKind::Count => {
                            m.ops.count_calls = m.ops.count_calls.saturating_add(1);
                            entry.count_calls = entry.count_calls.saturating_add(1);
                        }
                        ExecKind::Save => {
                            m.ops.save_calls = m.ops.save_calls.saturating_add(1);
                            entry.save_calls = entry.save_calls.saturating_add(1);
                        }
                        ExecKind::Delete => {
                            m.ops.delete_calls = m.ops.delete_calls.saturating_add(1);
                            entry.delete_calls = entry.delete_calls.saturating_add(1);
                        }
                    }
                });
            }

            MetricsEvent::ExecFinish {
                kind,
                entity_path,
                rows_touched,
                elapsed_micros,
            } => {
                metrics::with_state_mut(|m| {
                    let perf = &mut m.perf;
                    let (total, max) = match kind {
                        ExecKind::Filter => (&mut perf.filter_micros_total, &mut perf.filter_micros_max),
                        ExecKind::Count => (&mut perf.count_micros_total, &mut perf.count_micros_max),
                        ExecKind::Save => (&mut perf.save_micros_total, &mut perf.save_micros_max),
                        ExecKind::Delete => (&mut perf.delete_micros_total, &mut perf.delete_micros_max),
                    };
                    metrics::add_elapsed(total, max, elapsed_micros);

                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    match kind {
                        ExecKind::Filter => {
                            m.ops.rows_loaded = m.ops.rows_loaded.saturating_add(rows_touched);
                            entry.rows_loaded = entry.rows_loaded.saturating_add(rows_touched);
                        }
                        ExecKind::Count => {
                            m.ops.rows_counted = m.ops.rows_counted.saturating_add(rows_touched);
                            entry.rows_counted = entry.rows_counted.saturating_add(rows_touched);
                        }
                        ExecKind::Delete => {
                            m.ops.rows_deleted = m.ops.rows_deleted.saturating_add(rows_touched);
                            entry.rows_deleted = entry.rows_deleted.saturating_add(rows_touched);
                        }
                        ExecKind::Save => {}
                    }
                });
            }

            MetricsEvent::CompileFailed { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.compile_failures = m.ops.compile_failures.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.compile_failures = entry.compile_failures.saturating_add(1);
                });
            }

            MetricsEvent::TypeMismatch { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.type_mismatches = m.ops.type_mismatches.saturating_add(1);
                    let entry = m.entities.entry(entity_path.to_string()).or_default();
                    entry.type_mismatches = entry.type_mismatches.saturating_add(1);
                });
            }

            MetricsEvent::Plan { kind } => {
                metrics::with_state_mut(|m| match kind {
                    PlanKind::Filtered => {
                        m.ops.plan_filtered = m.ops.plan_filtered.saturating_add(1);
                    }
                    PlanKind::FullScan => {
                        m.ops.plan_full_scan = m.ops.plan_full_scan.saturating_add(1);
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current counters.
///
/// `window_start_ms` filters by the window start (`EventState::since_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all counters and perf totals.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with every event on this thread routed to `sink`.
/// The previous sink is restored on return and on unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish events for one executor call.
/// Finish accounting happens on drop, so early returns are counted too.

pub(crate) struct Span<E: EntityKind> {
    kind: ExecKind,
    start: Instant,
    rows: u64,
    _marker: PhantomData<E>,
}

impl<E: EntityKind> Span<E> {
    #[must_use]
    pub(crate) fn new(kind: ExecKind) -> Self {
        record(MetricsEvent::ExecStart {
            kind,
            entity_path: E::MODEL.path,
        });

        Self {
            kind,
            start: Instant::now(),
            rows: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }
}

impl<E: EntityKind> Drop for Span<E> {
    fn drop(&mut self) {
        let elapsed_micros = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);

        record(MetricsEvent::ExecFinish {
            kind: self.kind,
            entity_path: E::MODEL.path,
            rows_touched: self.rows,
            elapsed_micros,
        });
    }
}
