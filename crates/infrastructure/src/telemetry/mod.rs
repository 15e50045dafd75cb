//! Telemetry: tracing subscriber, OTLP trace export and Prometheus metrics

mod otel;
mod prometheus;

pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
pub use prometheus::{build_prometheus_recorder, install_prometheus_recorder};
