//! Request metrics for the HTTP boundary.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `hotel_gate_requests_total{endpoint, outcome}` - Gate requests by endpoint and outcome
//!
//! ## Histograms
//! - `hotel_gate_request_duration_seconds{endpoint}` - Time to answer a gate request

use metrics::{describe_counter, describe_histogram};

/// Counter of gate requests.
pub const REQUESTS_TOTAL: &str = "hotel_gate_requests_total";

/// Histogram of gate request latency.
pub const REQUEST_DURATION_SECONDS: &str = "hotel_gate_request_duration_seconds";

/// Outcome label for requests that failed with an internal error.
pub const OUTCOME_ERROR: &str = "error";

/// Register metric descriptions.
///
/// Call once at startup, after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        REQUESTS_TOTAL,
        "Total gate requests by endpoint and outcome (found, not_found, payment_required, error)"
    );
    describe_histogram!(
        REQUEST_DURATION_SECONDS,
        "Time taken to evaluate the gate and fetch catalog data"
    );
    describe_histogram!(
        "hotel_gate_store_query_duration_seconds",
        "Time taken by individual store queries"
    );

    tracing::info!("Gate metrics registered");
}

/// Record one answered request.
pub fn record_request(endpoint: &'static str, outcome: &'static str, elapsed_secs: f64) {
    metrics::counter!(REQUESTS_TOTAL, "endpoint" => endpoint, "outcome" => outcome).increment(1);
    metrics::histogram!(REQUEST_DURATION_SECONDS, "endpoint" => endpoint).record(elapsed_secs);
}
