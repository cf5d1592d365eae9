//! Metrics collection and exposition.
//!
//! # Metrics
//! - `arbor_analysis_results_total` (counter): results by operation, mode
//! - `arbor_fallbacks_total` (counter): fallbacks by operation, reason
//! - `arbor_remote_available` (gauge): 1=available, 0=unavailable
//! - `arbor_remote_call_duration_seconds` (histogram): remote call latency by operation

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::analysis::AnalysisMode;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

pub fn record_result(operation: &'static str, mode: AnalysisMode) {
    metrics::counter!(
        "arbor_analysis_results_total",
        "operation" => operation,
        "mode" => mode.as_str()
    )
    .increment(1);
}

pub fn record_fallback(operation: &'static str, reason: &'static str) {
    metrics::counter!(
        "arbor_fallbacks_total",
        "operation" => operation,
        "reason" => reason
    )
    .increment(1);
}

pub fn record_remote_available(available: bool) {
    metrics::gauge!("arbor_remote_available").set(if available { 1.0 } else { 0.0 });
}

pub fn record_remote_call(operation: &'static str, elapsed: Duration) {
    metrics::histogram!(
        "arbor_remote_call_duration_seconds",
        "operation" => operation
    )
    .record(elapsed.as_secs_f64());
}
