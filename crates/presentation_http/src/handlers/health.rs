//! Health check handler

use application::HealthStatus;
use axum::{Json, extract::State};

use crate::state::AppState;

/// Liveness plus circuit breaker state
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.catalog.health_status())
}
