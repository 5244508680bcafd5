//! Operation metrics for slot arrays (feature `metrics`).

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::SlotArrayMetrics;
pub use snapshot::SlotArrayMetricsSnapshot;
pub use traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider, SlotArrayMetricsRecorder};
