//! Fixed resilience parameters of the catalog service

use std::time::Duration;

use domain::ProductId;

use crate::resilience::SaturationConfig;

/// Parameters fixed at startup (chaos settings are the mutable part)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResilienceSettings {
    /// Time an open breaker waits before letting a trial call through
    pub recovery_timeout: Duration,
    /// Connection pool capacity
    pub pool_max_size: usize,
    /// Saturation window parameters
    pub saturation: SaturationConfig,
    /// CPU burned per request while CPU stress is enabled
    pub cpu_stress_duration: Duration,
    /// Product requested by every bulk call
    pub bulk_product_id: ProductId,
    /// Upper bound for a single bulk run
    pub max_bulk_requests: usize,
    /// Upper bound for one ballast injection
    pub max_leak_items: usize,
}

impl Default for ResilienceSettings {
    fn default() -> Self {
        Self {
            recovery_timeout: Duration::from_secs(30),
            pool_max_size: 5,
            saturation: SaturationConfig::default(),
            cpu_stress_duration: Duration::from_millis(500),
            bulk_product_id: ProductId::from_static("1"),
            max_bulk_requests: 1_000,
            max_leak_items: 100_000,
        }
    }
}
