//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting*, and *export* into small traits so
//! production monitoring and bench/testing never couple to slot allocation
//! logic.
//!
//! ## Architecture
//!
//! ```text
//!              ┌──────────────────────────────────┐
//!              │    SlotArrayMetricsRecorder      │
//!              │  add/edit/delete/read/clear      │
//!              └────────────────┬─────────────────┘
//!                               │ implemented by
//!                               ▼
//!              ┌──────────────────────────────────┐
//!              │       SlotArrayMetrics           │
//!              │   (atomic counters, &self)       │
//!              └────────────────┬─────────────────┘
//!                               │
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! ## Design Goals
//! - **Single responsibility**: recorders only write counters; providers only
//!   read/snapshot; exporters only publish to monitoring systems.
//! - **Shared-lock friendly**: every recorder method takes `&self`, since
//!   reads run under the shared side of the lock.

/// Counters for slot array operations.
pub trait SlotArrayMetricsRecorder {
    fn record_add_call(&self);
    fn record_add_full(&self);
    /// Slots inspected by one first-fit scan.
    fn record_scan_steps(&self, steps: u64);
    fn record_edit_call(&self);
    fn record_edit_not_found(&self);
    fn record_delete_call(&self);
    fn record_delete_removed(&self);
    fn record_read_call(&self);
    fn record_read_not_found(&self);
    fn record_clear(&self, released: u64);
}

/// Snapshot provider for tests and benchmarks.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
