//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::welcome))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::prometheus_metrics))
        // Catalog
        .route("/products/bulk/test", get(handlers::products::bulk_test))
        .route("/products/{product_id}", get(handlers::products::get_product))
        // Chaos control
        .route("/chaos/configure", post(handlers::chaos::configure))
        .route("/chaos/reset", post(handlers::chaos::reset))
        .route("/chaos/clear_cache", post(handlers::chaos::clear_cache))
        .route("/chaos/leak", post(handlers::chaos::leak))
        .with_state(state)
        // Layers added last run first: request id wraps the trace layer
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}
