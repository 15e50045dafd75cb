//! Resilience configuration: breaker recovery, pool, saturation, stressors.

use std::time::Duration;

use application::{ResilienceSettings, SaturationConfig};
use domain::ProductId;
use serde::{Deserialize, Serialize};

/// Fixed resilience parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResilienceAppConfig {
    /// Seconds an open breaker waits before a trial call
    #[serde(default = "default_recovery_timeout")]
    pub recovery_timeout_secs: u64,

    /// Simulated connection pool size
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: usize,

    /// Requests per window tolerated before latency is added
    #[serde(default = "default_saturation_threshold")]
    pub saturation_threshold: usize,

    /// Saturation window length in seconds
    #[serde(default = "default_saturation_window")]
    pub saturation_window_secs: u64,

    /// Latency added per request above the threshold, in milliseconds
    #[serde(default = "default_saturation_penalty")]
    pub saturation_penalty_ms: u64,

    /// CPU burned per request while CPU stress is enabled, in milliseconds
    #[serde(default = "default_cpu_stress")]
    pub cpu_stress_ms: u64,

    /// Product requested by bulk runs
    #[serde(default = "default_bulk_product_id")]
    pub bulk_product_id: String,

    /// Bulk run size when the caller gives none
    #[serde(default = "default_bulk_requests")]
    pub bulk_default_requests: usize,

    /// Upper bound for one bulk run
    #[serde(default = "default_max_bulk_requests")]
    pub max_bulk_requests: usize,

    /// Upper bound for one ballast injection
    #[serde(default = "default_max_leak_items")]
    pub max_leak_items: usize,
}

const fn default_recovery_timeout() -> u64 {
    30
}

const fn default_pool_max_size() -> usize {
    5
}

const fn default_saturation_threshold() -> usize {
    10
}

const fn default_saturation_window() -> u64 {
    10
}

const fn default_saturation_penalty() -> u64 {
    500
}

const fn default_cpu_stress() -> u64 {
    500
}

fn default_bulk_product_id() -> String {
    "1".to_string()
}

const fn default_bulk_requests() -> usize {
    15
}

const fn default_max_bulk_requests() -> usize {
    1_000
}

const fn default_max_leak_items() -> usize {
    100_000
}

impl Default for ResilienceAppConfig {
    fn default() -> Self {
        Self {
            recovery_timeout_secs: default_recovery_timeout(),
            pool_max_size: default_pool_max_size(),
            saturation_threshold: default_saturation_threshold(),
            saturation_window_secs: default_saturation_window(),
            saturation_penalty_ms: default_saturation_penalty(),
            cpu_stress_ms: default_cpu_stress(),
            bulk_product_id: default_bulk_product_id(),
            bulk_default_requests: default_bulk_requests(),
            max_bulk_requests: default_max_bulk_requests(),
            max_leak_items: default_max_leak_items(),
        }
    }
}

impl ResilienceAppConfig {
    /// Convert to the service's startup parameters
    ///
    /// # Errors
    ///
    /// Returns an error if `bulk_product_id` is blank.
    pub fn to_settings(&self) -> Result<ResilienceSettings, domain::DomainError> {
        Ok(ResilienceSettings {
            recovery_timeout: Duration::from_secs(self.recovery_timeout_secs),
            pool_max_size: self.pool_max_size,
            saturation: SaturationConfig {
                threshold: self.saturation_threshold,
                window: Duration::from_secs(self.saturation_window_secs),
                penalty_per_request: Duration::from_millis(self.saturation_penalty_ms),
            },
            cpu_stress_duration: Duration::from_millis(self.cpu_stress_ms),
            bulk_product_id: ProductId::new(&self.bulk_product_id)?,
            max_bulk_requests: self.max_bulk_requests,
            max_leak_items: self.max_leak_items,
        })
    }
}
