use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::SlotArrayMetricsSnapshot;
use crate::metrics::traits::{MetricsReset, SlotArrayMetricsRecorder};

/// Atomic operation counters for one slot array.
///
/// Relaxed ordering throughout: counters are observational and never used
/// to synchronize slot state.
#[derive(Debug, Default)]
pub struct SlotArrayMetrics {
    add_calls: AtomicU64,
    add_full: AtomicU64,
    scan_steps: AtomicU64,
    edit_calls: AtomicU64,
    edit_not_found: AtomicU64,
    delete_calls: AtomicU64,
    delete_removed: AtomicU64,
    read_calls: AtomicU64,
    read_not_found: AtomicU64,
    clear_calls: AtomicU64,
    cleared_items: AtomicU64,
}

#[inline]
fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}

impl SlotArrayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the counters; the caller fills in the gauges.
    pub fn snapshot_with(&self, used: usize, capacity: usize) -> SlotArrayMetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        SlotArrayMetricsSnapshot {
            add_calls: load(&self.add_calls),
            add_full: load(&self.add_full),
            scan_steps: load(&self.scan_steps),
            edit_calls: load(&self.edit_calls),
            edit_not_found: load(&self.edit_not_found),
            delete_calls: load(&self.delete_calls),
            delete_removed: load(&self.delete_removed),
            read_calls: load(&self.read_calls),
            read_not_found: load(&self.read_not_found),
            clear_calls: load(&self.clear_calls),
            cleared_items: load(&self.cleared_items),
            used,
            capacity,
        }
    }
}

impl SlotArrayMetricsRecorder for SlotArrayMetrics {
    #[inline]
    fn record_add_call(&self) {
        bump(&self.add_calls, 1);
    }

    #[inline]
    fn record_add_full(&self) {
        bump(&self.add_full, 1);
    }

    #[inline]
    fn record_scan_steps(&self, steps: u64) {
        bump(&self.scan_steps, steps);
    }

    #[inline]
    fn record_edit_call(&self) {
        bump(&self.edit_calls, 1);
    }

    #[inline]
    fn record_edit_not_found(&self) {
        bump(&self.edit_not_found, 1);
    }

    #[inline]
    fn record_delete_call(&self) {
        bump(&self.delete_calls, 1);
    }

    #[inline]
    fn record_delete_removed(&self) {
        bump(&self.delete_removed, 1);
    }

    #[inline]
    fn record_read_call(&self) {
        bump(&self.read_calls, 1);
    }

    #[inline]
    fn record_read_not_found(&self) {
        bump(&self.read_not_found, 1);
    }

    #[inline]
    fn record_clear(&self, released: u64) {
        bump(&self.clear_calls, 1);
        bump(&self.cleared_items, released);
    }
}

impl MetricsReset for SlotArrayMetrics {
    fn reset_metrics(&self) {
        for counter in [
            &self.add_calls,
            &self.add_full,
            &self.scan_steps,
            &self.edit_calls,
            &self.edit_not_found,
            &self.delete_calls,
            &self.delete_removed,
            &self.read_calls,
            &self.read_not_found,
            &self.clear_calls,
            &self.cleared_items,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
