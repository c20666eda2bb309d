use metrics::{counter, histogram};
use std::time::Duration;

/// Metric names used throughout the crate
///
/// Recording is a no-op unless the embedding application installs a metrics
/// recorder; the dashboard itself ships none.
pub struct MetricsCollector {
    pub records_loaded_total: &'static str,
    pub records_skipped_total: &'static str,
    pub load_duration: &'static str,
    pub aggregation_duration: &'static str,
    pub source_resolutions_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            records_loaded_total: "tg_dashboard_records_loaded_total",
            records_skipped_total: "tg_dashboard_records_skipped_total",
            load_duration: "tg_dashboard_load_duration_seconds",
            aggregation_duration: "tg_dashboard_aggregation_duration_seconds",
            source_resolutions_total: "tg_dashboard_source_resolutions_total",
        }
    }
}

impl MetricsCollector {
    /// Record the outcome of a table load
    pub fn record_load(&self, loaded: usize, skipped: usize, duration: Duration) {
        counter!(self.records_loaded_total).increment(loaded as u64);
        counter!(self.records_skipped_total).increment(skipped as u64);
        histogram!(self.load_duration).record(duration.as_secs_f64());
    }

    /// Record how long an aggregate view took to compute
    pub fn record_aggregation(&self, operation: &'static str, duration: Duration) {
        histogram!(self.aggregation_duration, "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Record which provider in the fallback chain served the dataset
    pub fn record_source_resolution(&self, source: &str) {
        counter!(self.source_resolutions_total, "source" => source.to_string()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        let collector = MetricsCollector::default();
        assert_eq!(
            collector.records_loaded_total,
            "tg_dashboard_records_loaded_total"
        );
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        let collector = MetricsCollector::default();
        collector.record_load(10, 2, Duration::from_millis(5));
        collector.record_source_resolution("demo");
    }
}
