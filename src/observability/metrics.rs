//! Metrics collection and exposition.
//!
//! # Metrics
//! - `contact_submissions_total` (counter): submissions by gate outcome
//!   (`accepted`, `invalid`, `rate_limited`) or `undecodable` for bodies that
//!   never reached the gate
//! - `contact_request_duration_seconds` (histogram): time to the gate decision
//! - `contact_sink_failures_total` (counter): failed deliveries of accepted submissions
//! - `contact_ledger_keys` (gauge): sources currently tracked by the rate ledger
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Outcome label for bodies that could not be decoded.
pub const UNDECODABLE: &str = "undecodable";

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_submission(outcome: &'static str, start: Instant) {
    counter!("contact_submissions_total", "outcome" => outcome).increment(1);
    histogram!("contact_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_sink_failure() {
    counter!("contact_sink_failures_total").increment(1);
}

pub fn record_ledger_keys(count: usize) {
    gauge!("contact_ledger_keys").set(count as f64);
}
