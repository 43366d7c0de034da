//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the map
//! only ever writes counters and consumers only ever read them.
//!
//! ```text
//!   ┌──────────────────────────────┐   ┌──────────────────────────────────┐
//!   │ OrderedMapMetricsRecorder    │   │ OrderedMapMetricsReadRecorder    │
//!   │ (&mut self: push/pop/get_mut)│   │ (&self: get/contains_key)        │
//!   └──────────────┬───────────────┘   └────────────────┬─────────────────┘
//!                  └───────────────┬────────────────────┘
//!                                  ▼
//!                        OrderedMapMetrics (counters)
//!                                  │
//!            ┌─────────────────────┴──────────────────────┐
//!            ▼                                            ▼
//!   MetricsSnapshotProvider<S>                   MetricsExporter<S>
//!   (tests / benches)                            (monitoring)
//! ```

/// Counters for the mutating operations of an ordered map.
pub trait OrderedMapMetricsRecorder {
    fn record_push_call(&mut self);
    fn record_push_new(&mut self);
    fn record_push_duplicate(&mut self);
    fn record_pop_call(&mut self);
    fn record_pop_found(&mut self);
    fn record_pop_empty(&mut self);
    fn record_get_mut_hit(&mut self);
    fn record_get_mut_miss(&mut self);
}

/// Counters for read-only operations, recorded through a shared reference.
pub trait OrderedMapMetricsReadRecorder {
    fn record_get_hit(&self);
    fn record_get_miss(&self);
    fn record_contains_call(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
