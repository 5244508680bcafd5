use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::SlotArrayMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for slot array metrics snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_sample(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_sample("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_sample("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<SlotArrayMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &SlotArrayMetricsSnapshot) {
        self.write_counter("add_calls_total", snapshot.add_calls);
        self.write_counter("add_full_total", snapshot.add_full);
        self.write_counter("add_scan_steps_total", snapshot.scan_steps);
        self.write_counter("edit_calls_total", snapshot.edit_calls);
        self.write_counter("edit_not_found_total", snapshot.edit_not_found);
        self.write_counter("delete_calls_total", snapshot.delete_calls);
        self.write_counter("delete_removed_total", snapshot.delete_removed);
        self.write_counter("read_calls_total", snapshot.read_calls);
        self.write_counter("read_not_found_total", snapshot.read_not_found);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("cleared_items_total", snapshot.cleared_items);
        self.write_gauge("used_slots", snapshot.used as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("uarray", Vec::new());
        let snapshot = SlotArrayMetricsSnapshot {
            add_calls: 3,
            add_full: 1,
            used: 2,
            capacity: 2,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE uarray_add_calls_total counter\nuarray_add_calls_total 3\n"));
        assert!(text.contains("uarray_add_full_total 1\n"));
        assert!(text.contains("# TYPE uarray_used_slots gauge\nuarray_used_slots 2\n"));
        assert!(text.contains("uarray_capacity 2\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&SlotArrayMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.starts_with("# TYPE add_calls_total counter\n"));
    }
}
