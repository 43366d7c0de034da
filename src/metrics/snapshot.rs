/// Point-in-time copy of an ordered map's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrderedMapMetricsSnapshot {
    pub push_calls: u64,
    pub push_new: u64,
    pub push_duplicates: u64,

    pub pop_calls: u64,
    pub pop_found: u64,
    pub pop_empty: u64,

    // get + get_mut combined
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub contains_calls: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl OrderedMapMetricsSnapshot {
    /// Fraction of lookups that found their key, or `0.0` with no lookups.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
