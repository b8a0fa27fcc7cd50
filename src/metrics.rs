//! Fetch and Analysis Phase Metrics
//!
//! Recorded through the `metrics` facade. The `multiverse_census` binary installs no
//! recorder and exports nothing; every call is then a no-op. Embedders that want the
//! numbers install their own recorder (e.g. a Prometheus exporter) before running the
//! pipeline.

macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("census_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("census_", $phase, "_", $name)
    };
}

/// Metrics for the paginated catalog fetch
pub struct FetchMetrics;

impl FetchMetrics {
    /// Record one successfully decoded page
    pub fn record_page(items: usize, matched: usize, skipped: usize, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "fetch", "pages")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "fetch", "titles_matched")).increment(matched as u64);
        ::metrics::counter!(phase_metric!(counter, "fetch", "titles_skipped")).increment(skipped as u64);
        ::metrics::histogram!(phase_metric!(histogram, "fetch", "page_items")).record(items as f64);
        ::metrics::histogram!(phase_metric!(histogram, "fetch", "page_duration_seconds"))
            .record(duration_secs);
    }

    pub fn record_error() {
        ::metrics::counter!(phase_metric!(counter, "fetch", "errors")).increment(1);
    }
}

/// Metrics for table loading and rollup analysis
pub struct AnalysisMetrics;

impl AnalysisMetrics {
    pub fn record_table(rows: usize, columns: usize) {
        ::metrics::histogram!(phase_metric!(histogram, "analysis", "table_rows")).record(rows as f64);
        ::metrics::histogram!(phase_metric!(histogram, "analysis", "table_columns"))
            .record(columns as f64);
    }

    pub fn record_table_reused() {
        ::metrics::counter!(phase_metric!(counter, "analysis", "table_reused")).increment(1);
    }

    pub fn record_summary() {
        ::metrics::counter!(phase_metric!(counter, "analysis", "summaries")).increment(1);
    }
}
