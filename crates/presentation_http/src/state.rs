//! Application state shared across handlers

use std::sync::Arc;

use application::CatalogService;
use infrastructure::AppConfig;
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The catalog and all its resilience state
    pub catalog: Arc<CatalogService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Prometheus renderer, absent when no recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state without a metrics renderer
    pub fn new(catalog: Arc<CatalogService>, config: Arc<AppConfig>) -> Self {
        Self {
            catalog,
            config,
            metrics: None,
        }
    }

    /// Attach a Prometheus renderer for `/metrics`
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("catalog", &self.catalog)
            .field("environment", &self.config.environment)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
