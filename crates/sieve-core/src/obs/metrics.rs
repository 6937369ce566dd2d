use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    cmp::Ordering,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters and elapsed-time totals for one thread.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,
    pub entities: BTreeMap<String, EntityCounters>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            perf: EventPerf::default(),
            entities: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Executor entrypoints
    pub filter_calls: u64,
    pub count_calls: u64,
    pub save_calls: u64,
    pub delete_calls: u64,

    // Plan kinds
    pub plan_filtered: u64,
    pub plan_full_scan: u64,

    // Rows touched
    pub rows_loaded: u64,
    pub rows_counted: u64,
    pub rows_deleted: u64,

    // Failures
    pub compile_failures: u64,
    pub type_mismatches: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntityCounters {
    pub filter_calls: u64,
    pub count_calls: u64,
    pub save_calls: u64,
    pub delete_calls: u64,
    pub rows_loaded: u64,
    pub rows_counted: u64,
    pub rows_deleted: u64,
    pub compile_failures: u64,
    pub type_mismatches: u64,
}

///
/// EventPerf
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventPerf {
    // Elapsed wall-clock totals per executor kind, in microseconds
    pub filter_micros_total: u128,
    pub count_micros_total: u128,
    pub save_micros_total: u128,
    pub delete_micros_total: u128,

    // Maximum observed single-call durations
    pub filter_micros_max: u64,
    pub count_micros_max: u64,
    pub save_micros_max: u64,
    pub delete_micros_max: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters and start a new window.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Accumulate an elapsed duration and track the max.
pub(crate) fn add_elapsed(total: &mut u128, max: &mut u64, micros: u64) {
    *total = total.saturating_add(u128::from(micros));
    *max = (*max).max(micros);
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Counters since `since_ms`; `None` when the window starts after the request.
    pub counters: Option<EventState>,
    /// Per-entity counters and averages.
    pub entity_counters: Vec<EntitySummary>,
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntitySummary {
    pub path: String,
    pub filter_calls: u64,
    pub count_calls: u64,
    pub delete_calls: u64,
    pub rows_loaded: u64,
    pub rows_deleted: u64,
    pub avg_rows_per_filter: f64,
    pub compile_failures: u64,
    pub type_mismatches: u64,
}

#[expect(clippy::cast_precision_loss)]
fn average(rows: u64, calls: u64) -> f64 {
    if calls == 0 {
        0.0
    } else {
        rows as f64 / calls as f64
    }
}

/// Build a report from the in-memory counters.
/// A `window_start_ms` later than the current window yields an empty report.
#[must_use]
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    let snap = with_state(Clone::clone);
    if window_start_ms.is_some_and(|start| start > snap.since_ms) {
        return EventReport::default();
    }

    let mut entity_counters: Vec<EntitySummary> = snap
        .entities
        .iter()
        .map(|(path, ops)| EntitySummary {
            path: path.clone(),
            filter_calls: ops.filter_calls,
            count_calls: ops.count_calls,
            delete_calls: ops.delete_calls,
            rows_loaded: ops.rows_loaded,
            rows_deleted: ops.rows_deleted,
            avg_rows_per_filter: average(ops.rows_loaded, ops.filter_calls),
            compile_failures: ops.compile_failures,
            type_mismatches: ops.type_mismatches,
        })
        .collect();

    entity_counters.sort_by(|a, b| {
        b.avg_rows_per_filter
            .partial_cmp(&a.avg_rows_per_filter)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.rows_loaded.cmp(&a.rows_loaded))
            .then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: Some(snap),
        entity_counters,
    }
}

///
/// TESTS
///

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reset_all_clears_state() {
        with_state_mut(|m| {
            m.ops.filter_calls = 3;
            m.ops.type_mismatches = 2;
            m.perf.save_micros_max = 9;
            m.entities.insert(
                "alpha".to_string(),
                EntityCounters {
                    filter_calls: 1,
                    ..Default::default()
                },
            );
        });

        reset_all();

        with_state(|m| {
            assert_eq!(m.ops.filter_calls, 0);
            assert_eq!(m.ops.type_mismatches, 0);
            assert_eq!(m.perf.save_micros_max, 0);
            assert!(m.entities.is_empty());
        });
    }

    #[test]
    fn add_elapsed_tracks_total_and_max() {
        let (mut total, mut max) = (0u128, 0u64);
        add_elapsed(&mut total, &mut max, 7);
        add_elapsed(&mut total, &mut max, 3);

        assert_eq!((total, max), (10, 7));
    }

    #[test]
    fn report_sorts_entities_by_average_rows() {
        reset_all();
        with_state_mut(|m| {
            for (path, calls, rows) in [("alpha", 2, 6), ("beta", 1, 5), ("gamma", 2, 6)] {
                m.entities.insert(
                    path.to_string(),
                    EntityCounters {
                        filter_calls: calls,
                        rows_loaded: rows,
                        ..Default::default()
                    },
                );
            }
        });

        let report = report_window_start(None);
        let paths: Vec<_> = report
            .entity_counters
            .iter()
            .map(|e| e.path.as_str())
            .collect();

        // avg rows per filter desc, then rows_loaded desc, then path asc
        assert_eq!(paths, ["beta", "alpha", "gamma"]);
        assert_eq!(report.entity_counters[0].avg_rows_per_filter, 5.0);
        assert_eq!(report.entity_counters[1].avg_rows_per_filter, 3.0);
    }
}
