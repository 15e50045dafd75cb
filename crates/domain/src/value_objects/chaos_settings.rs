//! Chaos settings value object
//!
//! A complete, validated snapshot of the fault-injection parameters.
//! Snapshots are immutable: changing chaos means building a new snapshot
//! and swapping it in as a whole.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::ChaosSettings;
//!
//! let settings = ChaosSettings::new(-2.0, 1.7, 0.25, false, 0);
//! assert_eq!(settings.db_latency_seconds(), 0.0);
//! assert_eq!(settings.db_failure_rate(), 1.0);
//! assert_eq!(settings.cache_failure_rate(), 0.25);
//! assert_eq!(settings.breaker_threshold(), 1);
//! ```

use std::time::Duration;

use serde::Serialize;

/// Fault-injection parameters, clamped into their valid ranges
///
/// - latency: `0.0..=MAX_DB_LATENCY_SECONDS`
/// - failure rates: `0.0..=1.0`
/// - breaker threshold: `>= 1`
///
/// Non-finite inputs clamp to the lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChaosSettings {
    db_latency_seconds: f64,
    db_failure_rate: f64,
    cache_failure_rate: f64,
    cpu_stress_enabled: bool,
    #[serde(rename = "circuit_breaker_threshold")]
    breaker_threshold: u32,
}

impl ChaosSettings {
    /// Upper bound for injected base latency (one hour)
    pub const MAX_DB_LATENCY_SECONDS: f64 = 3600.0;

    /// Breaker threshold used when nothing else is configured
    pub const DEFAULT_BREAKER_THRESHOLD: u32 = 5;

    /// Build a snapshot, clamping every field into range
    #[must_use]
    pub fn new(
        db_latency_seconds: f64,
        db_failure_rate: f64,
        cache_failure_rate: f64,
        cpu_stress_enabled: bool,
        breaker_threshold: u32,
    ) -> Self {
        Self {
            db_latency_seconds: clamp_finite(db_latency_seconds, 0.0, Self::MAX_DB_LATENCY_SECONDS),
            db_failure_rate: clamp_finite(db_failure_rate, 0.0, 1.0),
            cache_failure_rate: clamp_finite(cache_failure_rate, 0.0, 1.0),
            cpu_stress_enabled,
            breaker_threshold: breaker_threshold.max(1),
        }
    }

    /// Base latency added to every downstream call, in seconds
    #[must_use]
    pub const fn db_latency_seconds(&self) -> f64 {
        self.db_latency_seconds
    }

    /// Base latency as a `Duration`
    #[must_use]
    pub fn db_latency(&self) -> Duration {
        Duration::from_secs_f64(self.db_latency_seconds)
    }

    /// Probability that a downstream call fails
    #[must_use]
    pub const fn db_failure_rate(&self) -> f64 {
        self.db_failure_rate
    }

    /// Probability that the result cache is unavailable
    #[must_use]
    pub const fn cache_failure_rate(&self) -> f64 {
        self.cache_failure_rate
    }

    /// Whether each request burns CPU before being served
    #[must_use]
    pub const fn cpu_stress_enabled(&self) -> bool {
        self.cpu_stress_enabled
    }

    /// Consecutive failures that open the circuit breaker
    #[must_use]
    pub const fn breaker_threshold(&self) -> u32 {
        self.breaker_threshold
    }
}

impl Default for ChaosSettings {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, false, Self::DEFAULT_BREAKER_THRESHOLD)
    }
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet() {
        let settings = ChaosSettings::default();
        assert!(settings.db_latency_seconds().abs() < f64::EPSILON);
        assert!(settings.db_failure_rate().abs() < f64::EPSILON);
        assert!(settings.cache_failure_rate().abs() < f64::EPSILON);
        assert!(!settings.cpu_stress_enabled());
        assert_eq!(settings.breaker_threshold(), 5);
    }

    #[test]
    fn negative_latency_clamps_to_zero() {
        let settings = ChaosSettings::new(-1.5, 0.0, 0.0, false, 5);
        assert_eq!(settings.db_latency(), Duration::ZERO);
    }

    #[test]
    fn infinite_latency_clamps_to_ceiling() {
        let settings = ChaosSettings::new(f64::INFINITY, 0.0, 0.0, false, 5);
        assert!((settings.db_latency_seconds() - ChaosSettings::MAX_DB_LATENCY_SECONDS).abs() < f64::EPSILON);
        assert_eq!(settings.db_latency(), Duration::from_secs(3600));
    }

    #[test]
    fn nan_inputs_clamp_to_lower_bound() {
        let settings = ChaosSettings::new(f64::NAN, f64::NAN, f64::NAN, false, 5);
        assert!(settings.db_latency_seconds().abs() < f64::EPSILON);
        assert!(settings.db_failure_rate().abs() < f64::EPSILON);
        assert!(settings.cache_failure_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn rates_clamp_into_unit_interval() {
        let settings = ChaosSettings::new(0.0, 3.0, -0.4, false, 5);
        assert!((settings.db_failure_rate() - 1.0).abs() < f64::EPSILON);
        assert!(settings.cache_failure_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn zero_threshold_becomes_one() {
        let settings = ChaosSettings::new(0.0, 0.0, 0.0, false, 0);
        assert_eq!(settings.breaker_threshold(), 1);
    }

    #[test]
    fn fractional_latency_converts_to_duration() {
        let settings = ChaosSettings::new(0.25, 0.0, 0.0, true, 3);
        assert_eq!(settings.db_latency(), Duration::from_millis(250));
        assert!(settings.cpu_stress_enabled());
    }

    #[test]
    fn serializes_with_public_field_names() {
        let settings = ChaosSettings::new(1.0, 0.5, 0.1, true, 3);
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(json["db_latency_seconds"], 1.0);
        assert_eq!(json["db_failure_rate"], 0.5);
        assert_eq!(json["cache_failure_rate"], 0.1);
        assert_eq!(json["cpu_stress_enabled"], true);
        assert_eq!(json["circuit_breaker_threshold"], 3);
    }
}
