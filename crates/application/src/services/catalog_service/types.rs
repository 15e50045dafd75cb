//! Result shapes returned by the catalog service

use std::time::Duration;

use domain::{CircuitState, ProductRecord};
use serde::{Serialize, Serializer};

/// Where a served record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
    /// Result cache hit
    Cache,
    /// Fresh downstream read
    Database,
    /// Emergency data served while the circuit is open
    FallbackEmergency,
}

/// Successful `fetch_product` outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogResponse {
    /// Origin of `data`
    pub source: ProductSource,
    /// The product
    pub data: ProductRecord,
    /// Operator-facing note (fallback responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Total injected latency (database responses only)
    #[serde(
        rename = "latency_info",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_seconds"
    )]
    pub latency: Option<Duration>,
}

impl CatalogResponse {
    /// Note attached to emergency responses
    pub const FALLBACK_NOTE: &'static str = "Circuit Open! Returning emergency data.";

    pub(crate) fn cache(data: ProductRecord) -> Self {
        Self {
            source: ProductSource::Cache,
            data,
            note: None,
            latency: None,
        }
    }

    pub(crate) fn database(data: ProductRecord, latency: Duration) -> Self {
        Self {
            source: ProductSource::Database,
            data,
            note: None,
            latency: Some(latency),
        }
    }

    pub(crate) fn fallback(data: ProductRecord) -> Self {
        Self {
            source: ProductSource::FallbackEmergency,
            data,
            note: Some(Self::FALLBACK_NOTE.to_string()),
            latency: None,
        }
    }
}

/// Aggregate of a bulk run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    /// Requests issued
    pub total: usize,
    /// Requests that produced a response
    pub success: usize,
    /// Requests that failed
    pub failed: usize,
}

/// Liveness plus breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    /// Always `"ok"` while the process serves requests
    pub status: &'static str,
    /// Current breaker state
    pub circuit_breaker: CircuitState,
}

/// Resilience state shown on the welcome route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
    /// Current breaker state
    pub circuit_breaker: CircuitState,
    /// Requests in the saturation window
    pub db_load: usize,
    /// Penalty the next downstream call would pay
    #[serde(serialize_with = "serialize_seconds")]
    pub db_dynamic_latency: Duration,
}

/// Outcome of a ballast injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeakReport {
    /// KiB added by this call
    pub injected_kb: usize,
    /// Buffers held after this call
    pub total_items: usize,
}

/// Render a duration as seconds with an `s` suffix, e.g. `2.5s`
#[must_use]
pub fn format_seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs_f64())
}

fn serialize_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_seconds(*duration))
}

#[allow(clippy::ref_option)]
fn serialize_optional_seconds<S: Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serializer.serialize_str(&format_seconds(*d)),
        None => serializer.serialize_none(),
    }
}
