//! Infrastructure layer - Adapters and process setup
//!
//! Implements the application ports with in-memory stores, a moka cache,
//! tokio time, the thread RNG, the `metrics` facade and `tracing` spans.
//! Also owns configuration loading and telemetry initialization.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use config::{
    AppConfig, ChaosConfig, ENV_PREFIX, Environment, LogFormat, ResilienceAppConfig, ServerConfig,
};
pub use telemetry::{
    TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry, install_prometheus_recorder,
};
pub use wiring::{build_catalog_service, build_catalog_service_with, default_ports};
