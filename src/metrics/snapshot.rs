/// Point-in-time copy of a slot array's counters.
///
/// Counters are cumulative since construction (or the last reset); `used`
/// and `capacity` are gauges captured at snapshot time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SlotArrayMetricsSnapshot {
    pub add_calls: u64,
    pub add_full: u64,
    pub scan_steps: u64,

    pub edit_calls: u64,
    pub edit_not_found: u64,

    pub delete_calls: u64,
    pub delete_removed: u64,

    pub read_calls: u64,
    pub read_not_found: u64,

    pub clear_calls: u64,
    pub cleared_items: u64,

    // gauges captured at snapshot time
    pub used: usize,
    pub capacity: usize,
}

impl SlotArrayMetricsSnapshot {
    /// Successful adds (calls that were not rejected as full).
    #[inline]
    pub fn add_successes(&self) -> u64 {
        self.add_calls - self.add_full
    }

    /// Average slots inspected per successful add.
    pub fn avg_scan_steps(&self) -> f64 {
        let successes = self.add_successes();
        if successes == 0 {
            0.0
        } else {
            self.scan_steps as f64 / successes as f64
        }
    }

    /// Fraction of reads that found an item.
    pub fn read_hit_rate(&self) -> f64 {
        if self.read_calls == 0 {
            0.0
        } else {
            (self.read_calls - self.read_not_found) as f64 / self.read_calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_rates_handle_zero_calls() {
        let snap = SlotArrayMetricsSnapshot::default();
        assert_eq!(snap.add_successes(), 0);
        assert_eq!(snap.avg_scan_steps(), 0.0);
        assert_eq!(snap.read_hit_rate(), 0.0);
    }

    #[test]
    fn derived_rates() {
        let snap = SlotArrayMetricsSnapshot {
            add_calls: 5,
            add_full: 1,
            scan_steps: 8,
            read_calls: 4,
            read_not_found: 1,
            ..Default::default()
        };
        assert_eq!(snap.add_successes(), 4);
        assert_eq!(snap.avg_scan_steps(), 2.0);
        assert_eq!(snap.read_hit_rate(), 0.75);
    }
}
