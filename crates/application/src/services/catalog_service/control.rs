//! Chaos control, bulk runs and status reporting

use std::sync::Arc;

use domain::{ChaosSettings, CircuitState};
use futures::future::join_all;
use tracing::{info, instrument, warn};

use super::{
    BALLAST_ITEM_BYTES, BulkSummary, CatalogError, CatalogService, HealthStatus, LeakReport,
    SystemStatus,
};

impl CatalogService {
    /// Issue `requests` concurrent fetches of the bulk product id
    ///
    /// The count is capped at `max_bulk_requests`.
    #[instrument(skip(self))]
    pub async fn bulk_test(&self, requests: usize) -> BulkSummary {
        let total = requests.min(self.settings.max_bulk_requests);
        if total < requests {
            warn!(requested = requests, capped = total, "Bulk request count capped");
        }

        let id = &self.settings.bulk_product_id;
        let results = join_all((0..total).map(|_| self.fetch_product(id))).await;
        let success = results.iter().filter(|r| r.is_ok()).count();

        info!(total, success, failed = total - success, "Bulk test completed");
        BulkSummary {
            total,
            success,
            failed: total - success,
        }
    }

    /// Swap in a new chaos snapshot and apply its breaker threshold
    ///
    /// Concurrent callers are serialized so the snapshot and the breaker
    /// threshold always come from the same update.
    #[instrument(skip(self))]
    pub fn configure_chaos(&self, settings: ChaosSettings) -> ChaosSettings {
        let _update = self.chaos_update.lock();
        self.apply_chaos(settings)
    }

    /// Restore the default chaos snapshot, then close the breaker
    ///
    /// The breaker is closed only once the default threshold is in place, and
    /// the whole reset runs under the same lock as `configure_chaos`.
    #[instrument(skip(self))]
    pub fn reset_chaos(&self) -> ChaosSettings {
        let _update = self.chaos_update.lock();
        let settings = self.apply_chaos(ChaosSettings::default());
        self.breaker.record_success();
        settings
    }

    // Caller holds `chaos_update`
    fn apply_chaos(&self, settings: ChaosSettings) -> ChaosSettings {
        self.chaos.store(Arc::new(settings));
        self.breaker
            .set_failure_threshold(settings.breaker_threshold());

        let metrics = &self.ports.metrics;
        metrics.gauge("catalog.chaos.db_latency", settings.db_latency_seconds());
        metrics.gauge("catalog.chaos.db_failure_rate", settings.db_failure_rate());
        metrics.gauge(
            "catalog.chaos.cache_failure_rate",
            settings.cache_failure_rate(),
        );
        metrics.gauge(
            "catalog.chaos.cpu_stress_enabled",
            if settings.cpu_stress_enabled() { 1.0 } else { 0.0 },
        );
        metrics.gauge(
            "catalog.chaos.cb_threshold",
            f64::from(settings.breaker_threshold()),
        );

        info!(
            db_latency_seconds = settings.db_latency_seconds(),
            db_failure_rate = settings.db_failure_rate(),
            cache_failure_rate = settings.cache_failure_rate(),
            cpu_stress_enabled = settings.cpu_stress_enabled(),
            breaker_threshold = settings.breaker_threshold(),
            "Chaos configuration updated"
        );
        settings
    }

    /// Empty the result cache (the emergency dataset is untouched)
    pub async fn clear_cache(&self) -> Result<(), CatalogError> {
        self.ports
            .cache
            .clear()
            .await
            .map_err(|e| CatalogError::CacheUnavailable(e.to_string()))?;
        info!("Result cache cleared");
        Ok(())
    }

    /// Liveness and breaker state
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus {
            status: "ok",
            circuit_breaker: self.breaker.state(),
        }
    }

    /// Breaker state plus saturation load and penalty
    pub fn system_status(&self) -> SystemStatus {
        SystemStatus {
            circuit_breaker: self.breaker.state(),
            db_load: self.saturation.current_load(),
            db_dynamic_latency: self.saturation.dynamic_latency(),
        }
    }

    /// Current breaker state
    pub fn circuit_state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Grow the memory ballast by `items` KiB buffers (capped per call)
    pub fn simulate_leak(&self, items: usize) -> LeakReport {
        let items = items.min(self.settings.max_leak_items);
        let total_items = self.ballast.grow(items);

        #[allow(clippy::cast_precision_loss)]
        self.ports
            .metrics
            .gauge("catalog.app.memory_leak_size", total_items as f64);
        warn!(items, total_items, "Memory ballast grown");

        LeakReport {
            injected_kb: items * BALLAST_ITEM_BYTES / 1024,
            total_items,
        }
    }
}
