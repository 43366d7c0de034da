use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::OrderedMapMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for ordered map metrics snapshots.
///
/// Writes in the Prometheus text exposition format. Write failures are
/// ignored; exporting is best-effort and never affects the map.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<OrderedMapMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &OrderedMapMetricsSnapshot) {
        let counters = [
            ("push_calls_total", snapshot.push_calls),
            ("push_new_total", snapshot.push_new),
            ("push_duplicates_total", snapshot.push_duplicates),
            ("pop_calls_total", snapshot.pop_calls),
            ("pop_found_total", snapshot.pop_found),
            ("pop_empty_total", snapshot.pop_empty),
            ("get_calls_total", snapshot.get_calls),
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("contains_calls_total", snapshot.contains_calls),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", &self.metric_name(suffix), value);
        }
        self.write_metric("gauge", &self.metric_name("len"), snapshot.len as u64);
        self.write_metric(
            "gauge",
            &self.metric_name("capacity"),
            snapshot.capacity as u64,
        );
    }
}
