//! Composition of the catalog service from the concrete adapters

use std::sync::Arc;

use application::{CatalogPorts, CatalogService};
use domain::DomainError;
use tracing::info;

use crate::{
    adapters::{
        MetricsFacadeSink, MokaResultCache, StaticProductStore, ThreadRngFaultSource, TokioClock,
        TracingTracer,
    },
    config::AppConfig,
};

/// Ports backed by the production adapters
///
/// Seeded catalog, emergency dataset, moka cache, tokio clock, thread RNG,
/// `metrics` facade and `tracing` spans.
pub fn default_ports() -> CatalogPorts {
    CatalogPorts::new(
        Arc::new(StaticProductStore::seeded()),
        Arc::new(StaticProductStore::emergency_fallback()),
        Arc::new(MokaResultCache::new()),
        Arc::new(TokioClock),
        Arc::new(ThreadRngFaultSource),
    )
    .with_metrics(Arc::new(MetricsFacadeSink))
    .with_tracer(Arc::new(TracingTracer))
}

/// Build the catalog service from configuration
///
/// # Errors
///
/// Returns an error if the resilience configuration is invalid.
pub fn build_catalog_service(config: &AppConfig) -> Result<CatalogService, DomainError> {
    build_catalog_service_with(config, default_ports())
}

/// Build the catalog service from configuration and explicit ports
pub fn build_catalog_service_with(
    config: &AppConfig,
    ports: CatalogPorts,
) -> Result<CatalogService, DomainError> {
    let settings = config.resilience.to_settings()?;
    let chaos = config.chaos.to_settings();
    info!(
        pool_max_size = settings.pool_max_size,
        recovery_timeout_secs = settings.recovery_timeout.as_secs(),
        breaker_threshold = chaos.breaker_threshold(),
        db_failure_rate = chaos.db_failure_rate(),
        "Catalog service configured"
    );
    Ok(CatalogService::new(ports, settings, chaos))
}

#[cfg(test)]
mod tests {
    use domain::CircuitState;

    use super::*;
    use crate::config::ResilienceAppConfig;

    #[test]
    fn builds_from_default_config() {
        let service = build_catalog_service(&AppConfig::default()).unwrap();
        assert_eq!(service.pool().max_size(), 5);
        assert_eq!(service.breaker().failure_threshold(), 5);
        assert_eq!(service.breaker().state(), CircuitState::Closed);
    }

    #[test]
    fn chaos_config_sets_initial_threshold() {
        let mut config = AppConfig::default();
        config.chaos.breaker_threshold = 2;
        config.chaos.db_failure_rate = 0.4;

        let service = build_catalog_service(&config).unwrap();
        assert_eq!(service.breaker().failure_threshold(), 2);
        assert!((service.chaos_settings().db_failure_rate() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_resilience_config_is_rejected() {
        let config = AppConfig {
            resilience: ResilienceAppConfig {
                bulk_product_id: String::new(),
                ..ResilienceAppConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(build_catalog_service(&config).is_err());
    }
}
