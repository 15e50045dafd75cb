//! Initial fault-injection settings.

use domain::ChaosSettings;
use serde::{Deserialize, Serialize};

/// Chaos parameters applied at startup
///
/// Values are clamped when converted to [`ChaosSettings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Base latency added to every downstream call, in seconds
    #[serde(default)]
    pub db_latency_seconds: f64,

    /// Probability of an injected downstream failure
    #[serde(default)]
    pub db_failure_rate: f64,

    /// Probability that the result cache is unavailable
    #[serde(default)]
    pub cache_failure_rate: f64,

    /// Burn CPU on every product request
    #[serde(default)]
    pub cpu_stress_enabled: bool,

    /// Consecutive failures that open the circuit breaker
    #[serde(default = "default_breaker_threshold")]
    pub breaker_threshold: u32,
}

const fn default_breaker_threshold() -> u32 {
    ChaosSettings::DEFAULT_BREAKER_THRESHOLD
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            db_latency_seconds: 0.0,
            db_failure_rate: 0.0,
            cache_failure_rate: 0.0,
            cpu_stress_enabled: false,
            breaker_threshold: default_breaker_threshold(),
        }
    }
}

impl ChaosConfig {
    /// Clamp into a validated snapshot
    #[must_use]
    pub fn to_settings(&self) -> ChaosSettings {
        ChaosSettings::new(
            self.db_latency_seconds,
            self.db_failure_rate,
            self.cache_failure_rate,
            self.cpu_stress_enabled,
            self.breaker_threshold,
        )
    }
}
