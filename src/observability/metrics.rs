//! Metrics collection and exposition.
//!
//! # Metrics
//! - `ticket_queue_http_requests_total` (counter): requests by route, status
//! - `ticket_queue_http_request_duration_seconds` (histogram): latency by route
//! - `ticket_queue_store_retries_total` (counter): retried store calls by operation
//! - `ticket_queue_store_errors_total` (counter): failed store calls by operation, kind
//! - `ticket_queue_tickets_issued_total` / `ticket_queue_tickets_called_total` (counters)
//!
//! Every series carries the `environment` and `queue` global labels.
//! Without an installed recorder the macros are no-ops, which is what unit
//! and integration tests rely on.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Install the Prometheus recorder for this process.
///
/// The returned handle renders the text exposition served on `/metrics`.
pub fn init_metrics(environment: &str, queue_name: &str) -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .add_global_label("environment", environment)
        .add_global_label("queue", queue_name)
        .install_recorder()?;
    tracing::info!(environment, queue = queue_name, "Prometheus recorder installed");
    Ok(handle)
}

/// Periodically drain histogram buckets held by the recorder.
pub fn spawn_upkeep(handle: PrometheusHandle) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            handle.run_upkeep();
        }
    })
}

pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    counter!(
        "ticket_queue_http_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("ticket_queue_http_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_store_retry(operation: &'static str) {
    counter!("ticket_queue_store_retries_total", "operation" => operation).increment(1);
}

pub fn record_store_error(operation: &'static str, kind: &'static str) {
    counter!("ticket_queue_store_errors_total", "operation" => operation, "kind" => kind).increment(1);
}

pub fn record_ticket_issued() {
    counter!("ticket_queue_tickets_issued_total").increment(1);
}

pub fn record_ticket_called() {
    counter!("ticket_queue_tickets_called_total").increment(1);
}
