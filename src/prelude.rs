pub use crate::builder::SlotArrayBuilder;
pub use crate::ds::{ConcurrentSlotArray, IndexListing, Slot, SlotArray, format_indices};
pub use crate::error::{BuildError, ConfigError, Rejected, SlotArrayError, TeardownBlocker};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    MetricsExporter, MetricsReset, MetricsSnapshotProvider, PrometheusTextExporter,
    SlotArrayMetricsSnapshot,
};
