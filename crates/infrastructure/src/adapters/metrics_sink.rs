//! Metrics adapter over the `metrics` facade
//!
//! Whatever recorder is installed globally (Prometheus in the server binary)
//! receives the values; without one every call is a no-op.

use application::ports::MetricsPort;

/// `MetricsPort` implementation forwarding to `metrics::{counter, gauge, histogram}`
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsFacadeSink;

impl MetricsPort for MetricsFacadeSink {
    fn increment(&self, name: &'static str) {
        metrics::counter!(name).increment(1);
    }

    fn gauge(&self, name: &'static str, value: f64) {
        metrics::gauge!(name).set(value);
    }

    fn histogram(&self, name: &'static str, value: f64) {
        metrics::histogram!(name).record(value);
    }
}
