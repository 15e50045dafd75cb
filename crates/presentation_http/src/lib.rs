//! Catalog resilience lab HTTP presentation layer
//!
//! A thin axum shell over [`application::CatalogService`]: product lookups,
//! bulk traffic, chaos control, health and Prometheus metrics.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, set_expose_internal_errors};
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::create_router;
pub use state::AppState;
