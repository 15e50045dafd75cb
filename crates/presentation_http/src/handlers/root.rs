//! Welcome page

use application::SystemStatus;
use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Welcome message shown at `/`
pub const WELCOME_MESSAGE: &str = "Welcome to the ADVANCED Chaos Engineering Lab!";

/// Pointers to the most useful routes
#[derive(Debug, Clone, Serialize)]
pub struct UsefulEndpoints {
    pub health_check: &'static str,
    pub example_product: &'static str,
    pub bulk_retries_test: &'static str,
    pub chaos_configure: &'static str,
    pub metrics: &'static str,
}

impl Default for UsefulEndpoints {
    fn default() -> Self {
        Self {
            health_check: "/health",
            example_product: "/products/1",
            bulk_retries_test: "/products/bulk/test",
            chaos_configure: "/chaos/configure",
            metrics: "/metrics",
        }
    }
}

/// Welcome response with live resilience status
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub system_status: SystemStatus,
    pub useful_endpoints: UsefulEndpoints,
}

/// Welcome page with breaker state and saturation load
pub async fn welcome(State(state): State<AppState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
        system_status: state.catalog.system_status(),
        useful_endpoints: UsefulEndpoints::default(),
    })
}
