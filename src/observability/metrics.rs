//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tessera_requests_total` (counter): requests by method and status
//! - `tessera_request_duration_seconds` (histogram): latency by method
//! - `tessera_context_pool_idle` (gauge): contexts waiting for reuse
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - The Prometheus exporter serves its own HTTP endpoint

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one finished request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    metrics::counter!(
        "tessera_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "tessera_request_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the number of idle pooled contexts.
pub fn record_pool_idle(idle: usize) {
    metrics::gauge!("tessera_context_pool_idle").set(idle as f64);
}
