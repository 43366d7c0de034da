//! Operation counters for [`OrderedMap`](crate::ds::OrderedMap).
//!
//! Enabled with the `metrics` cargo feature. Counters are observational only
//! and never change map behavior.
//!
//! ## Key Components
//!
//! - [`traits`]: recorder, snapshot-provider, reset and exporter traits.
//! - [`metrics_impl::OrderedMapMetrics`]: the counter block embedded in the map.
//! - [`snapshot::OrderedMapMetricsSnapshot`]: plain `Copy` view of the counters.
//! - [`exporter::PrometheusTextExporter`]: writes snapshots in Prometheus text format.
//!
//! ## Example Usage
//!
//! ```
//! use ordkit::ds::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.push_back("a", 1).unwrap();
//! let _ = map.push_back("a", 2);
//! let _ = map.get(&"missing");
//!
//! let snap = map.metrics_snapshot();
//! assert_eq!(snap.push_calls, 2);
//! assert_eq!(snap.push_duplicates, 1);
//! assert_eq!(snap.get_misses, 1);
//! assert_eq!(snap.len, 1);
//! ```

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
