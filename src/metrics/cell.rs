use std::sync::atomic::{AtomicU64, Ordering};

/// A metrics-only counter that can be bumped through `&self`.
///
/// Used for read-path counters (`get`, `contains_key`) so that lookups stay
/// `&self`. Backed by a relaxed `AtomicU64`, so the owning map keeps its
/// `Sync` bound when metrics are enabled.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

impl Clone for MetricsCell {
    fn clone(&self) -> Self {
        Self(AtomicU64::new(self.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn metrics_cell_counts_and_resets() {
        let cell = MetricsCell::new();
        assert_eq!(cell.get(), 0);
        cell.incr();
        cell.incr();
        assert_eq!(cell.get(), 2);

        let copy = cell.clone();
        cell.reset();
        assert_eq!(cell.get(), 0);
        assert_eq!(copy.get(), 2);
    }

    #[test]
    fn metrics_cell_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MetricsCell>();
    }

    #[test]
    fn metrics_cell_counts_across_threads() {
        let cell = Arc::new(MetricsCell::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        cell.incr();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cell.get(), 4000);
    }
}
