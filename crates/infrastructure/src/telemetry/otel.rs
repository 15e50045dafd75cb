//! Tracing subscriber and OpenTelemetry initialization
//!
//! Sets up the `EnvFilter`, a text or JSON fmt layer and, when enabled, an
//! OTLP span exporter. When the collector cannot be reached the subscriber
//! falls back to console-only logging unless `graceful_fallback` is off.

use std::time::Duration;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{Sampler, SdkTracerProvider},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Configuration for telemetry/tracing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OpenTelemetry export is enabled
    #[serde(default)]
    pub enabled: bool,

    /// OTLP endpoint URL (e.g., "http://localhost:4317" for gRPC)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Service name for traces
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Sampling ratio (0.0 - 1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Export timeout in seconds
    #[serde(default = "default_export_timeout")]
    pub export_timeout_secs: u64,

    /// Log level filter, used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Fall back to console-only logging if the OTLP exporter cannot be built
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_export_timeout() -> u64 {
    10
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "catalog-lab".to_string()
}

fn default_log_filter() -> String {
    "application=info,infrastructure=info,presentation_http=info,catalog_lab_server=info,tower_http=info".to_string()
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
            export_timeout_secs: default_export_timeout(),
            log_filter: default_log_filter(),
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

impl TelemetryConfig {
    fn sampler(&self) -> Sampler {
        if self.sampling_ratio >= 1.0 {
            Sampler::AlwaysOn
        } else if self.sampling_ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(self.sampling_ratio)
        }
    }
}

/// Guard that shuts down the tracer provider when dropped
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("active", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!("Failed to shutdown tracer provider: {:?}", e);
            }
        }
    }
}

fn build_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.endpoint)
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .build();

    Ok(SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_sampler(config.sampler())
        .with_resource(resource)
        .build())
}

/// Initialize the global tracing subscriber
///
/// Returns a guard that must be kept alive for the duration of the
/// application. Dropping it flushes and shuts down the exporter.
///
/// # Example
///
/// ```ignore
/// use infrastructure::{LogFormat, telemetry::{TelemetryConfig, init_telemetry}};
///
/// let _guard = init_telemetry(&TelemetryConfig::default(), LogFormat::Json)?;
/// ```
pub fn init_telemetry(
    config: &TelemetryConfig,
    format: LogFormat,
) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let mut fallback_reason = None;
    let provider = if config.enabled {
        match build_provider(config) {
            Ok(provider) => Some(provider),
            Err(e) if config.graceful_fallback => {
                fallback_reason = Some(e);
                None
            },
            Err(e) => return Err(e),
        }
    } else {
        None
    };

    let text_layer = (format == LogFormat::Text).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
    });
    let json_layer = (format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
    });
    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))?;

    if let Some(reason) = fallback_reason {
        warn!(
            endpoint = %config.endpoint,
            error = %reason,
            "OTLP exporter unavailable, falling back to console-only logging"
        );
    } else if provider.is_some() {
        info!(
            endpoint = %config.endpoint,
            service = %config.service_name,
            sampling = %config.sampling_ratio,
            "Telemetry initialized with OTLP export"
        );
    } else {
        info!(?format, "Telemetry initialized (console only)");
    }

    Ok(TelemetryGuard { provider })
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Failed to create OTLP exporter
    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(String),

    /// Failed to install the metrics recorder
    #[error("Failed to install metrics recorder: {0}")]
    Metrics(String),
}
