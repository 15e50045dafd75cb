//! Application services - Use case implementations

mod catalog_service;

pub use catalog_service::{
    BALLAST_ITEM_BYTES, BulkSummary, CatalogError, CatalogPorts, CatalogResponse, CatalogService,
    DATABASE_RESOURCE, FALLBACK_RESOURCE, HealthStatus, LeakReport, MemoryBallast, ProductSource,
    ResilienceSettings, SystemStatus, format_seconds,
};
