use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{OrderedMapMetricsReadRecorder, OrderedMapMetricsRecorder};

#[derive(Debug, Default, Clone)]
pub struct OrderedMapMetrics {
    pub push_calls: u64,
    pub push_new: u64,
    pub push_duplicates: u64,
    pub pop_calls: u64,
    pub pop_found: u64,
    pub pop_empty: u64,
    pub get_mut_hits: u64,
    pub get_mut_misses: u64,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub contains_calls: MetricsCell,
}

impl OrderedMapMetrics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl OrderedMapMetricsRecorder for OrderedMapMetrics {
    fn record_push_call(&mut self) {
        self.push_calls += 1;
    }

    fn record_push_new(&mut self) {
        self.push_new += 1;
    }

    fn record_push_duplicate(&mut self) {
        self.push_duplicates += 1;
    }

    fn record_pop_call(&mut self) {
        self.pop_calls += 1;
    }

    fn record_pop_found(&mut self) {
        self.pop_found += 1;
    }

    fn record_pop_empty(&mut self) {
        self.pop_empty += 1;
    }

    fn record_get_mut_hit(&mut self) {
        self.get_mut_hits += 1;
    }

    fn record_get_mut_miss(&mut self) {
        self.get_mut_misses += 1;
    }
}

impl OrderedMapMetricsReadRecorder for &OrderedMapMetrics {
    fn record_get_hit(&self) {
        self.get_hits.incr();
    }

    fn record_get_miss(&self) {
        self.get_misses.incr();
    }

    fn record_contains_call(&self) {
        self.contains_calls.incr();
    }
}
