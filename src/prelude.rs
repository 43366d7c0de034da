pub use crate::ds::OrderedMap;
pub use crate::error::{InvariantError, OrderedMapError};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::OrderedMapMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
