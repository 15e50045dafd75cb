//! Catalog service - Resilient product lookup with fault injection
//!
//! This module is split into focused sub-modules:
//! - [`control`]: chaos configuration, cache clearing, bulk runs, status
//! - [`error`]: the pipeline failure taxonomy
//! - [`settings`]: startup resilience parameters
//! - [`stress`]: CPU burn and memory ballast
//! - [`types`]: response shapes
//!
//! `fetch_product` runs a fixed sequence of stages:
//!
//! 1. Cache probe (may be made unavailable by chaos; a failure is a miss)
//! 2. Circuit breaker admission, with the emergency dataset as fallback
//! 3. Non-blocking connection pool checkout
//! 4. Saturation window bookkeeping
//! 5. Simulated downstream call: injected fault, injected plus saturation
//!    latency, store lookup, then breaker and cache update

mod control;
mod error;
mod settings;
mod stress;
mod types;

use std::{fmt, sync::Arc, time::Duration};

use arc_swap::ArcSwap;
use domain::{ChaosSettings, ProductId, ProductRecord};
use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};

pub use error::CatalogError;
pub use settings::ResilienceSettings;
pub use stress::{BALLAST_ITEM_BYTES, MemoryBallast};
pub use types::{
    BulkSummary, CatalogResponse, HealthStatus, LeakReport, ProductSource, SystemStatus,
    format_seconds,
};

use crate::{
    ports::{
        ClockPort, FaultSourcePort, MetricsPort, NoopMetrics, NoopTracer, ProductStorePort,
        ResultCachePort, SpanPort, TracerPort,
    },
    resilience::{CircuitBreaker, CircuitBreakerConfig, ConnectionPool, SaturationWindow},
};

/// Span resource of the simulated database
pub const DATABASE_RESOURCE: &str = "MockPostgres";
/// Span resource of the emergency dataset
pub const FALLBACK_RESOURCE: &str = "Emergency Cache";

/// Collaborators of the catalog service
pub struct CatalogPorts {
    /// Source-of-truth catalog
    pub products: Arc<dyn ProductStorePort>,
    /// Emergency dataset served while the circuit is open
    pub fallback: Arc<dyn ProductStorePort>,
    /// Write-through result cache
    pub cache: Arc<dyn ResultCachePort>,
    /// Time and latency injection
    pub clock: Arc<dyn ClockPort>,
    /// Randomness for fault injection
    pub faults: Arc<dyn FaultSourcePort>,
    /// Metrics sink (no-op by default)
    pub metrics: Arc<dyn MetricsPort>,
    /// Trace spans (no-op by default)
    pub tracer: Arc<dyn TracerPort>,
}

impl fmt::Debug for CatalogPorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogPorts")
            .field("cache", &self.cache)
            .field("clock", &self.clock)
            .field("faults", &self.faults)
            .field("metrics", &self.metrics)
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl CatalogPorts {
    /// Bundle the required ports; metrics and tracing start as no-ops
    pub fn new(
        products: Arc<dyn ProductStorePort>,
        fallback: Arc<dyn ProductStorePort>,
        cache: Arc<dyn ResultCachePort>,
        clock: Arc<dyn ClockPort>,
        faults: Arc<dyn FaultSourcePort>,
    ) -> Self {
        Self {
            products,
            fallback,
            cache,
            clock,
            faults,
            metrics: Arc::new(NoopMetrics),
            tracer: Arc::new(NoopTracer),
        }
    }

    /// Attach a metrics sink
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsPort>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Attach a tracer
    #[must_use]
    pub fn with_tracer(mut self, tracer: Arc<dyn TracerPort>) -> Self {
        self.tracer = tracer;
        self
    }
}

/// Owner of all resilience state of the catalog
///
/// One instance per process, shared behind an `Arc` by the transport layer.
pub struct CatalogService {
    ports: CatalogPorts,
    settings: ResilienceSettings,
    chaos: ArcSwap<ChaosSettings>,
    chaos_update: Mutex<()>,
    breaker: CircuitBreaker,
    pool: Arc<ConnectionPool>,
    saturation: SaturationWindow,
    ballast: MemoryBallast,
}

impl fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogService")
            .field("chaos", &self.chaos_settings())
            .field("breaker", &self.breaker)
            .field("pool", &self.pool)
            .field("saturation", &self.saturation)
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Create the service with an initial chaos snapshot
    ///
    /// The breaker threshold is taken from `initial_chaos`.
    pub fn new(
        ports: CatalogPorts,
        settings: ResilienceSettings,
        initial_chaos: ChaosSettings,
    ) -> Self {
        let breaker = CircuitBreaker::new(
            "product-store",
            CircuitBreakerConfig {
                failure_threshold: initial_chaos.breaker_threshold(),
                recovery_timeout: settings.recovery_timeout,
            },
            Arc::clone(&ports.clock),
        )
        .with_metrics(Arc::clone(&ports.metrics));
        let pool = Arc::new(
            ConnectionPool::new(settings.pool_max_size).with_metrics(Arc::clone(&ports.metrics)),
        );
        let saturation = SaturationWindow::new(settings.saturation, Arc::clone(&ports.clock));

        Self {
            ports,
            settings,
            chaos: ArcSwap::from_pointee(initial_chaos),
            chaos_update: Mutex::new(()),
            breaker,
            pool,
            saturation,
            ballast: MemoryBallast::default(),
        }
    }

    /// Circuit breaker guarding the product store
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Simulated connection pool
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Saturation window
    pub fn saturation(&self) -> &SaturationWindow {
        &self.saturation
    }

    /// Startup parameters
    pub fn settings(&self) -> &ResilienceSettings {
        &self.settings
    }

    /// Fetch a product through the resilience pipeline
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: &ProductId) -> Result<CatalogResponse, CatalogError> {
        let chaos = self.chaos_settings();

        if chaos.cpu_stress_enabled() {
            stress::burn_cpu(self.settings.cpu_stress_duration).await;
        }

        match self.probe_cache(id, chaos.cache_failure_rate()).await {
            Ok(Some(record)) => return Ok(CatalogResponse::cache(record)),
            Ok(None) => {},
            Err(e) => warn!(error = %e, "Failed to access cache, continuing as miss"),
        }

        if !self.breaker.can_execute() {
            return self.serve_fallback(id).await;
        }

        let Some(connection) = self.pool.try_checkout() else {
            return Err(self.reject_pool_exhausted());
        };

        self.saturation.record_request();

        let mut span = self.ports.tracer.start_span("db.query", DATABASE_RESOURCE);
        span.set_tag("db.pool.active", connection.pool_active().to_string());
        span.set_tag("product.id", id.to_string());

        let outcome = self.query_downstream(id, &chaos, span.as_mut()).await;

        match outcome {
            Ok((record, latency)) => {
                self.breaker.record_success();
                if let Err(e) = self.ports.cache.put(record.clone()).await {
                    warn!(error = %e, "Failed to write result cache");
                }
                self.publish_query_metrics(latency);
                Ok(CatalogResponse::database(record, latency))
            },
            Err(err) => {
                if err.counts_against_breaker() {
                    self.breaker.record_failure();
                }
                span.set_tag("error.type", err.kind().to_string());
                span.set_error(err.counts_against_breaker());
                match &err {
                    CatalogError::Unclassified(source) => {
                        error!(error = %source, "Downstream call failed unexpectedly");
                    },
                    CatalogError::NotFound(_) => debug!("Product not found"),
                    _ => warn!(error = %err, kind = err.kind(), "Downstream call failed"),
                }
                Err(err)
            },
        }
    }

    /// Current chaos snapshot
    pub fn chaos_settings(&self) -> ChaosSettings {
        **self.chaos.load()
    }

    async fn probe_cache(
        &self,
        id: &ProductId,
        failure_rate: f64,
    ) -> Result<Option<ProductRecord>, CatalogError> {
        if self.ports.faults.fires(failure_rate) {
            return Err(CatalogError::CacheUnavailable(
                "Simulated Cache is unavailable".to_string(),
            ));
        }

        let cached = self
            .ports
            .cache
            .get(id)
            .await
            .map_err(|e| CatalogError::CacheUnavailable(e.to_string()))?;

        if cached.is_some() {
            debug!("Cache hit");
            self.ports.metrics.increment("catalog.cache.hit");
        } else {
            debug!("Cache miss");
            self.ports.metrics.increment("catalog.cache.miss");
        }
        Ok(cached)
    }

    async fn serve_fallback(&self, id: &ProductId) -> Result<CatalogResponse, CatalogError> {
        self.ports
            .metrics
            .increment("catalog.circuit_breaker.rejected");

        let mut span = self
            .ports
            .tracer
            .start_span("logic.fallback", FALLBACK_RESOURCE);
        span.set_tag(
            "resilience.circuit_breaker.state",
            self.breaker.state().to_string(),
        );

        match self.ports.fallback.find(id).await {
            Ok(Some(record)) => {
                span.set_tag("app.fallback_used", "true".to_string());
                self.ports.metrics.increment("catalog.fallback.hit");
                warn!("Circuit open, serving emergency data");
                Ok(CatalogResponse::fallback(record))
            },
            Ok(None) => {
                warn!("Circuit open and no emergency data available");
                Err(CatalogError::CircuitOpen(id.clone()))
            },
            Err(e) => {
                warn!(error = %e, "Emergency dataset lookup failed");
                Err(CatalogError::CircuitOpen(id.clone()))
            },
        }
    }

    fn reject_pool_exhausted(&self) -> CatalogError {
        let active = self.pool.active();
        let max_size = self.pool.max_size();

        let mut span = self.ports.tracer.start_span("db.pool_error", DATABASE_RESOURCE);
        span.set_tag("db.pool.active", active.to_string());
        span.set_tag("db.pool.max", max_size.to_string());
        span.set_error(true);

        warn!(active, max_size, "Connection pool exhausted");
        CatalogError::PoolExhausted { active, max_size }
    }

    async fn query_downstream(
        &self,
        id: &ProductId,
        chaos: &ChaosSettings,
        span: &mut dyn SpanPort,
    ) -> Result<(ProductRecord, Duration), CatalogError> {
        if self.ports.faults.fires(chaos.db_failure_rate()) {
            span.set_tag("error.message", "Simulated DB Failure".to_string());
            return Err(CatalogError::DownstreamFailure(
                "Simulated DB is unavailable".to_string(),
            ));
        }

        let injected = chaos.db_latency();
        let saturation = self.saturation.dynamic_latency();
        let total = injected.saturating_add(saturation);

        if !total.is_zero() {
            info!(
                total = %format_seconds(total),
                injected = %format_seconds(injected),
                saturation = %format_seconds(saturation),
                "Simulating downstream latency"
            );
            self.ports.clock.sleep(total).await;
        }

        match self.ports.products.find(id).await {
            Ok(Some(record)) => Ok((record, total)),
            Ok(None) => {
                span.set_tag("product.found", "false".to_string());
                Err(CatalogError::NotFound(id.clone()))
            },
            Err(e) => Err(CatalogError::Unclassified(e)),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn publish_query_metrics(&self, latency: Duration) {
        let seconds = latency.as_secs_f64();
        self.ports
            .metrics
            .gauge("catalog.db.load", self.saturation.current_load() as f64);
        self.ports
            .metrics
            .histogram("catalog.db.query.duration", seconds);
        self.ports.metrics.gauge("catalog.db.latency.total", seconds);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use domain::CircuitState;
    use futures::FutureExt;

    use super::*;
    use crate::{
        ApplicationError,
        ports::MockProductStorePort,
        testing::{
            InMemoryProductStore, InMemoryResultCache, ManualClock, RecordingMetrics,
            RecordingTracer, ScriptedFaultSource,
        },
    };

    fn record(id: &'static str, name: &str) -> ProductRecord {
        ProductRecord::new(ProductId::from_static(id), name, 100.0, "desc")
    }

    fn id(value: &'static str) -> ProductId {
        ProductId::from_static(value)
    }

    struct Harness {
        service: CatalogService,
        clock: Arc<ManualClock>,
        cache: Arc<InMemoryResultCache>,
        products: Arc<InMemoryProductStore>,
        metrics: Arc<RecordingMetrics>,
        tracer: RecordingTracer,
    }

    fn harness_with(settings: ResilienceSettings, chaos: ChaosSettings, draw: f64) -> Harness {
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(InMemoryResultCache::new());
        let products = Arc::new(InMemoryProductStore::new([
            record("1", "Gamer Laptop"),
            record("2", "Ultrawide Monitor"),
            record("3", "Mechanical Keyboard"),
        ]));
        let fallback = Arc::new(InMemoryProductStore::new([record(
            "1",
            "Laptop (Emergency Cache)",
        )]));
        let metrics = Arc::new(RecordingMetrics::new());
        let tracer = RecordingTracer::new();

        let ports = CatalogPorts::new(
            products.clone(),
            fallback,
            cache.clone(),
            clock.clone(),
            Arc::new(ScriptedFaultSource::constant(draw)),
        )
        .with_metrics(metrics.clone())
        .with_tracer(Arc::new(tracer.clone()));

        Harness {
            service: CatalogService::new(ports, settings, chaos),
            clock,
            cache,
            products,
            metrics,
            tracer,
        }
    }

    fn harness() -> Harness {
        harness_with(ResilienceSettings::default(), ChaosSettings::default(), 0.5)
    }

    fn chaos(latency: f64, db_rate: f64, cache_rate: f64, threshold: u32) -> ChaosSettings {
        ChaosSettings::new(latency, db_rate, cache_rate, false, threshold)
    }

    #[tokio::test]
    async fn first_read_hits_database_then_cache() {
        let h = harness();

        let first = h.service.fetch_product(&id("1")).await.unwrap();
        assert_eq!(first.source, ProductSource::Database);
        assert_eq!(first.data.id, id("1"));
        assert_eq!(first.latency, Some(Duration::ZERO));

        let second = h.service.fetch_product(&id("1")).await.unwrap();
        assert_eq!(second.source, ProductSource::Cache);
        assert_eq!(second.data, first.data);

        assert_eq!(h.products.lookups(), 1);
        assert_eq!(h.metrics.count("catalog.cache.miss"), 1);
        assert_eq!(h.metrics.count("catalog.cache.hit"), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_and_not_a_breaker_failure() {
        let h = harness();

        let err = h.service.fetch_product(&id("99")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref missing) if *missing == id("99")));
        assert_eq!(h.service.breaker().consecutive_failures(), 0);
        assert!(!h.cache.contains(&id("99")));

        let spans = h.tracer.named("db.query");
        assert_eq!(spans[0].tag("product.found"), Some("false"));
        assert_eq!(spans[0].tag("error.type"), Some("not_found"));
        assert!(!spans[0].error);
    }

    #[tokio::test]
    async fn injected_failures_open_breaker_at_threshold() {
        let h = harness();
        h.service.configure_chaos(chaos(0.0, 1.0, 0.0, 3));

        for attempt in 1..=3 {
            let err = h.service.fetch_product(&id("1")).await.unwrap_err();
            assert!(matches!(err, CatalogError::DownstreamFailure(_)));
            assert_eq!(h.service.breaker().consecutive_failures(), attempt);
        }

        assert_eq!(h.service.circuit_state(), CircuitState::Open);
        assert!(!h.cache.contains(&id("1")));
        assert_eq!(h.service.pool().active(), 0);

        let span = &h.tracer.named("db.query")[0];
        assert_eq!(span.tag("error.message"), Some("Simulated DB Failure"));
        assert!(span.error);
    }

    #[tokio::test]
    async fn open_breaker_serves_emergency_data() {
        let h = harness();
        h.service.configure_chaos(chaos(0.0, 1.0, 0.0, 1));
        h.service.fetch_product(&id("1")).await.unwrap_err();

        let response = h.service.fetch_product(&id("1")).await.unwrap();
        assert_eq!(response.source, ProductSource::FallbackEmergency);
        assert_eq!(response.data.name, "Laptop (Emergency Cache)");
        assert_eq!(
            response.note.as_deref(),
            Some(CatalogResponse::FALLBACK_NOTE)
        );
        assert_eq!(h.metrics.count("catalog.fallback.hit"), 1);
        assert_eq!(h.metrics.count("catalog.circuit_breaker.rejected"), 1);

        let span = &h.tracer.named("logic.fallback")[0];
        assert_eq!(span.resource, FALLBACK_RESOURCE);
        assert_eq!(span.tag("resilience.circuit_breaker.state"), Some("OPEN"));
        assert_eq!(span.tag("app.fallback_used"), Some("true"));
    }

    #[tokio::test]
    async fn open_breaker_without_fallback_is_circuit_open() {
        let h = harness();
        h.service.configure_chaos(chaos(0.0, 1.0, 0.0, 1));
        h.service.fetch_product(&id("2")).await.unwrap_err();

        let err = h.service.fetch_product(&id("2")).await.unwrap_err();
        assert!(matches!(err, CatalogError::CircuitOpen(_)));
        assert!(err.is_service_unavailable());
        assert_eq!(h.service.breaker().consecutive_failures(), 1);
    }

    #[tokio::test]
    async fn breaker_recovers_after_timeout() {
        let h = harness();
        h.service.configure_chaos(chaos(0.0, 1.0, 0.0, 1));
        h.service.fetch_product(&id("2")).await.unwrap_err();
        h.service.configure_chaos(chaos(0.0, 0.0, 0.0, 1));

        h.clock.advance(Duration::from_secs(31));
        let response = h.service.fetch_product(&id("2")).await.unwrap();
        assert_eq!(response.source, ProductSource::Database);
        assert_eq!(h.service.circuit_state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn second_concurrent_request_sees_pool_exhausted() {
        let settings = ResilienceSettings {
            pool_max_size: 1,
            ..ResilienceSettings::default()
        };
        let h = harness_with(settings, chaos(1.0, 0.0, 0.0, 5), 0.5);

        let (id1, id2) = (id("1"), id("2"));
        let (a, b) = futures::join!(
            h.service.fetch_product(&id1),
            h.service.fetch_product(&id2)
        );

        assert_eq!(a.unwrap().source, ProductSource::Database);
        let err = b.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::PoolExhausted {
                active: 1,
                max_size: 1
            }
        ));
        assert_eq!(h.service.breaker().consecutive_failures(), 0);
        assert_eq!(h.service.pool().active(), 0);

        let span = &h.tracer.named("db.pool_error")[0];
        assert_eq!(span.tag("db.pool.max"), Some("1"));
        assert!(span.error);
    }

    #[tokio::test]
    async fn saturation_adds_latency_after_threshold() {
        // Cache always unavailable so every request reaches the downstream step
        let h = harness_with(
            ResilienceSettings::default(),
            chaos(0.0, 0.0, 1.0, 5),
            0.0,
        );

        let mut last = None;
        for _ in 0..15 {
            last = Some(h.service.fetch_product(&id("1")).await.unwrap());
        }

        let last = last.unwrap();
        assert_eq!(last.source, ProductSource::Database);
        assert_eq!(last.latency, Some(Duration::from_millis(2500)));
        assert_eq!(h.service.saturation().current_load(), 15);
        assert_eq!(
            h.clock.sleeps(),
            vec![
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(1500),
                Duration::from_millis(2000),
                Duration::from_millis(2500),
            ]
        );
    }

    #[tokio::test]
    async fn base_latency_adds_to_saturation_penalty() {
        let h = harness_with(
            ResilienceSettings::default(),
            chaos(0.5, 0.0, 1.0, 5),
            0.0,
        );
        for _ in 0..11 {
            h.service.fetch_product(&id("1")).await.unwrap();
        }
        assert_eq!(h.clock.sleeps().last(), Some(&Duration::from_millis(1000)));
        assert_eq!(
            h.metrics.last_gauge("catalog.db.latency.total"),
            Some(1.0)
        );
    }

    #[tokio::test]
    async fn store_error_is_unclassified_and_counted() {
        let mut products = MockProductStorePort::new();
        products
            .expect_find()
            .returning(|_| Err(ApplicationError::ExternalService("connection reset".into())));
        let ports = CatalogPorts::new(
            Arc::new(products),
            Arc::new(InMemoryProductStore::default()),
            Arc::new(InMemoryResultCache::new()),
            Arc::new(ManualClock::new()),
            Arc::new(ScriptedFaultSource::constant(0.5)),
        );
        let service = CatalogService::new(
            ports,
            ResilienceSettings::default(),
            ChaosSettings::default(),
        );

        let err = service.fetch_product(&id("1")).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Unclassified(ApplicationError::ExternalService(_))
        ));
        assert_eq!(service.breaker().consecutive_failures(), 1);
        assert_eq!(service.pool().active(), 0);
    }

    #[tokio::test]
    async fn cache_outage_is_recovered_as_miss() {
        let h = harness();
        h.service.fetch_product(&id("1")).await.unwrap();
        h.service.configure_chaos(chaos(0.0, 0.0, 1.0, 5));

        let response = h.service.fetch_product(&id("1")).await.unwrap();
        assert_eq!(response.source, ProductSource::Database);
        assert_eq!(h.products.lookups(), 2);
    }

    #[tokio::test]
    async fn cancelled_request_releases_pool_slot() {
        let h = harness_with(
            ResilienceSettings::default(),
            chaos(5.0, 0.0, 0.0, 5),
            0.5,
        );

        let pending = h.service.fetch_product(&id("1")).now_or_never();
        assert!(pending.is_none());
        assert_eq!(h.service.pool().active(), 0);
        assert_eq!(h.service.saturation().current_load(), 1);
        assert!(!h.cache.contains(&id("1")));
    }

    #[tokio::test]
    async fn success_resets_failure_count() {
        let h = harness_with(
            ResilienceSettings::default(),
            ChaosSettings::default(),
            0.5,
        );
        h.service.configure_chaos(chaos(0.0, 1.0, 0.0, 5));
        h.service.fetch_product(&id("1")).await.unwrap_err();
        h.service.fetch_product(&id("1")).await.unwrap_err();
        assert_eq!(h.service.breaker().consecutive_failures(), 2);

        h.service.configure_chaos(chaos(0.0, 0.0, 0.0, 5));
        h.service.fetch_product(&id("1")).await.unwrap();
        assert_eq!(h.service.breaker().consecutive_failures(), 0);
    }

    #[tokio::test]
    async fn bulk_test_is_bounded_by_pool() {
        let h = harness_with(
            ResilienceSettings::default(),
            chaos(1.0, 0.0, 0.0, 5),
            0.5,
        );

        let summary = h.service.bulk_test(15).await;
        assert_eq!(
            summary,
            BulkSummary {
                total: 15,
                success: 5,
                failed: 10
            }
        );
        assert_eq!(h.service.pool().active(), 0);
    }

    #[tokio::test]
    async fn bulk_test_caps_request_count() {
        let settings = ResilienceSettings {
            max_bulk_requests: 3,
            ..ResilienceSettings::default()
        };
        let h = harness_with(settings, ChaosSettings::default(), 0.5);
        let summary = h.service.bulk_test(50).await;
        assert_eq!(summary.total, 3);
        assert_eq!(summary.success, 3);
    }

    #[test]
    fn configure_chaos_replaces_snapshot_and_threshold() {
        let h = harness();
        let applied = h.service.configure_chaos(chaos(2.0, 0.3, 0.1, 7));

        assert_eq!(h.service.chaos_settings(), applied);
        assert_eq!(h.service.breaker().failure_threshold(), 7);
        assert_eq!(h.metrics.last_gauge("catalog.chaos.cb_threshold"), Some(7.0));
        assert_eq!(h.metrics.last_gauge("catalog.chaos.db_latency"), Some(2.0));
    }

    #[tokio::test]
    async fn reset_chaos_closes_breaker_and_restores_defaults() {
        let h = harness();
        h.service.configure_chaos(chaos(0.0, 1.0, 0.5, 1));
        h.service.fetch_product(&id("2")).await.unwrap_err();
        assert_eq!(h.service.circuit_state(), CircuitState::Open);

        let settings = h.service.reset_chaos();
        assert_eq!(settings, ChaosSettings::default());
        assert_eq!(h.service.chaos_settings(), ChaosSettings::default());
        assert_eq!(h.service.health_status().circuit_breaker, CircuitState::Closed);

        let again = h.service.reset_chaos();
        assert_eq!(again, ChaosSettings::default());
        assert_eq!(h.service.circuit_state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn reset_chaos_installs_default_threshold_before_closing() {
        let h = harness();
        h.service.configure_chaos(chaos(0.0, 1.0, 0.0, 1));
        h.service.fetch_product(&id("2")).await.unwrap_err();
        assert_eq!(h.service.circuit_state(), CircuitState::Open);

        h.service.reset_chaos();
        let snap = h.service.breaker().snapshot();
        assert_eq!(snap.state, CircuitState::Closed);
        assert_eq!(snap.consecutive_failures, 0);
        assert_eq!(snap.failure_threshold, ChaosSettings::DEFAULT_BREAKER_THRESHOLD);

        // A late failure from a request admitted under the old snapshot
        assert_eq!(h.service.breaker().record_failure(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn raising_threshold_while_open_keeps_breaker_consistent() {
        let h = harness();
        h.service.configure_chaos(chaos(0.0, 1.0, 0.0, 1));
        h.service.fetch_product(&id("2")).await.unwrap_err();

        h.service.configure_chaos(chaos(0.0, 0.0, 0.0, 5));
        let snap = h.service.breaker().snapshot();
        assert_eq!(snap.state, CircuitState::Open);
        assert!(snap.consecutive_failures >= snap.failure_threshold);

        let err = h.service.fetch_product(&id("2")).await.unwrap_err();
        assert!(matches!(err, CatalogError::CircuitOpen(_)));
    }

    #[tokio::test]
    async fn clear_cache_forces_next_read_downstream() {
        let h = harness();
        h.service.fetch_product(&id("1")).await.unwrap();
        h.service.clear_cache().await.unwrap();

        let response = h.service.fetch_product(&id("1")).await.unwrap();
        assert_eq!(response.source, ProductSource::Database);
    }

    #[tokio::test]
    async fn system_status_reports_load() {
        let h = harness_with(
            ResilienceSettings::default(),
            chaos(0.0, 0.0, 1.0, 5),
            0.0,
        );
        for _ in 0..12 {
            h.service.fetch_product(&id("3")).await.unwrap();
        }
        let status = h.service.system_status();
        assert_eq!(status.circuit_breaker, CircuitState::Closed);
        assert_eq!(status.db_load, 12);
        assert_eq!(status.db_dynamic_latency, Duration::from_secs(1));
    }

    #[test]
    fn health_status_is_ok() {
        let h = harness();
        let health = h.service.health_status();
        assert_eq!(health.status, "ok");
        assert_eq!(health.circuit_breaker, CircuitState::Closed);
    }

    #[test]
    fn simulate_leak_accumulates_and_caps() {
        let settings = ResilienceSettings {
            max_leak_items: 10,
            ..ResilienceSettings::default()
        };
        let h = harness_with(settings, ChaosSettings::default(), 0.5);

        let first = h.service.simulate_leak(4);
        assert_eq!(first.injected_kb, 4);
        assert_eq!(first.total_items, 4);

        let second = h.service.simulate_leak(50);
        assert_eq!(second.injected_kb, 10);
        assert_eq!(second.total_items, 14);
        assert_eq!(
            h.metrics.last_gauge("catalog.app.memory_leak_size"),
            Some(14.0)
        );
    }

    #[tokio::test]
    async fn cpu_stress_still_serves_request() {
        let settings = ResilienceSettings {
            cpu_stress_duration: Duration::from_millis(5),
            ..ResilienceSettings::default()
        };
        let h = harness_with(
            settings,
            ChaosSettings::new(0.0, 0.0, 0.0, true, 5),
            0.5,
        );
        let response = h.service.fetch_product(&id("1")).await.unwrap();
        assert_eq!(response.source, ProductSource::Database);
    }

    #[test]
    fn debug_output_is_non_exhaustive() {
        let h = harness();
        let debug = format!("{:?}", h.service);
        assert!(debug.contains("CatalogService"));
        assert!(debug.contains(".."));
    }
}
