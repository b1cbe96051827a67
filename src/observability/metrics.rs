//! Metrics collection and exposition.
//!
//! # Metrics
//! - `requisition_submissions_total` (counter): submissions by outcome
//! - `requisition_submission_duration_seconds` (histogram): handler latency
//! - `requisition_webhook_total` (counter): webhook attempts by outcome
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exporter is opt-in (`observability.metrics_enabled`)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::delivery::WebhookStatus;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled submission.
pub fn record_submission(outcome: &'static str, start: Instant) {
    metrics::counter!("requisition_submissions_total", "outcome" => outcome).increment(1);
    metrics::histogram!("requisition_submission_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record the webhook channel result of a submission.
pub fn record_webhook(status: &WebhookStatus) {
    let outcome = match status {
        WebhookStatus::Delivered => "delivered",
        WebhookStatus::Skipped => "skipped",
        WebhookStatus::Failed(_) => "failed",
    };
    metrics::counter!("requisition_webhook_total", "outcome" => outcome).increment(1);
}
