//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{ChaosSettings, ProductId};
use proptest::prelude::*;

// ============================================================================
// ChaosSettings Property Tests
// ============================================================================

mod chaos_settings_tests {
    use super::*;

    proptest! {
        #[test]
        fn rates_always_within_unit_interval(
            db_rate in proptest::num::f64::ANY,
            cache_rate in proptest::num::f64::ANY,
        ) {
            let settings = ChaosSettings::new(0.0, db_rate, cache_rate, false, 5);
            prop_assert!((0.0..=1.0).contains(&settings.db_failure_rate()));
            prop_assert!((0.0..=1.0).contains(&settings.cache_failure_rate()));
        }

        #[test]
        fn latency_never_negative_and_converts(latency in proptest::num::f64::ANY) {
            let settings = ChaosSettings::new(latency, 0.0, 0.0, false, 5);
            prop_assert!(settings.db_latency_seconds() >= 0.0);
            prop_assert!(settings.db_latency_seconds() <= ChaosSettings::MAX_DB_LATENCY_SECONDS);
            // Must not panic for any input
            let _ = settings.db_latency();
        }

        #[test]
        fn in_range_values_are_preserved(
            latency in 0.0f64..100.0,
            db_rate in 0.0f64..=1.0,
            cache_rate in 0.0f64..=1.0,
            cpu in any::<bool>(),
            threshold in 1u32..1000,
        ) {
            let settings = ChaosSettings::new(latency, db_rate, cache_rate, cpu, threshold);
            prop_assert!((settings.db_latency_seconds() - latency).abs() < f64::EPSILON);
            prop_assert!((settings.db_failure_rate() - db_rate).abs() < f64::EPSILON);
            prop_assert!((settings.cache_failure_rate() - cache_rate).abs() < f64::EPSILON);
            prop_assert_eq!(settings.cpu_stress_enabled(), cpu);
            prop_assert_eq!(settings.breaker_threshold(), threshold);
        }

        #[test]
        fn threshold_is_positive(threshold in any::<u32>()) {
            let settings = ChaosSettings::new(0.0, 0.0, 0.0, false, threshold);
            prop_assert!(settings.breaker_threshold() >= 1);
        }
    }
}

// ============================================================================
// ProductId Property Tests
// ============================================================================

mod product_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_ids_are_trimmed(raw in "[ \t]{0,3}[a-zA-Z0-9-]{1,16}[ \t]{0,3}") {
            let id = ProductId::new(&raw).unwrap();
            prop_assert_eq!(id.as_str(), raw.trim());
        }

        #[test]
        fn whitespace_only_rejected(raw in "[ \t\n]{0,8}") {
            prop_assert!(ProductId::new(&raw).is_err());
        }
    }
}
