//! Loader Metrics
//!
//! Counters and histograms emitted through the `metrics` facade. The crate
//! never installs a recorder; without one these calls are no-ops.

/// Metrics collection for prediction loads
pub struct LoaderMetrics;

impl LoaderMetrics {
    /// Record the outcome of one file load
    pub fn record_load(
        rows_loaded: usize,
        rows_skipped: usize,
        row_errors: usize,
        unexpected_values: usize,
        duration_secs: f64,
    ) {
        ::metrics::counter!("value_eval_loads_total").increment(1);
        ::metrics::counter!("value_eval_rows_loaded_total").increment(rows_loaded as u64);
        ::metrics::counter!("value_eval_rows_skipped_total").increment(rows_skipped as u64);
        ::metrics::counter!("value_eval_row_errors_total").increment(row_errors as u64);
        ::metrics::counter!("value_eval_unexpected_values_total")
            .increment(unexpected_values as u64);
        ::metrics::histogram!("value_eval_load_duration_seconds").record(duration_secs);
    }

    /// Record a load that failed before any row was read
    pub fn record_load_failure(reason: &'static str) {
        ::metrics::counter!("value_eval_load_failures_total", "reason" => reason).increment(1);
    }
}
