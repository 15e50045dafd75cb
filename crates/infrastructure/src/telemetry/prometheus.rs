//! Prometheus recorder for the `metrics` facade

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

use super::TelemetryError;

/// Histogram buckets for downstream latencies, in seconds
const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Build a recorder with latency buckets for the `catalog.db` histograms
pub fn build_prometheus_recorder() -> Result<PrometheusRecorder, TelemetryError> {
    Ok(PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Prefix("catalog.db".to_string()), LATENCY_BUCKETS)
        .map_err(|e| TelemetryError::Metrics(e.to_string()))?
        .build_recorder())
}

/// Install the recorder globally and return a handle for rendering
///
/// Fails if another global recorder is already installed.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, TelemetryError> {
    let recorder = build_prometheus_recorder()?;
    let handle = recorder.handle();
    metrics::set_global_recorder(recorder).map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    Ok(handle)
}
