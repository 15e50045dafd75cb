//! Chaos control handlers
//!
//! Fault injection is configured through query parameters so the lab can be
//! driven with plain `curl -X POST`.

use axum::{
    Json,
    extract::{Query, State},
};
use domain::ChaosSettings;
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Query parameters of `/chaos/configure`
///
/// Missing parameters take the quiet defaults, so each call replaces the
/// whole configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigureChaosParams {
    #[serde(default)]
    pub db_latency: f64,
    #[serde(default)]
    pub db_failure_rate: f64,
    #[serde(default)]
    pub cache_failure_rate: f64,
    #[serde(default)]
    pub cpu_stress: bool,
    #[serde(default = "default_cb_threshold")]
    pub cb_threshold: u32,
}

const fn default_cb_threshold() -> u32 {
    ChaosSettings::DEFAULT_BREAKER_THRESHOLD
}

impl Default for ConfigureChaosParams {
    fn default() -> Self {
        Self {
            db_latency: 0.0,
            db_failure_rate: 0.0,
            cache_failure_rate: 0.0,
            cpu_stress: false,
            cb_threshold: default_cb_threshold(),
        }
    }
}

impl From<ConfigureChaosParams> for ChaosSettings {
    fn from(params: ConfigureChaosParams) -> Self {
        Self::new(
            params.db_latency,
            params.db_failure_rate,
            params.cache_failure_rate,
            params.cpu_stress,
            params.cb_threshold,
        )
    }
}

/// Applied chaos settings
#[derive(Debug, Clone, Serialize)]
pub struct ChaosResponse {
    pub message: &'static str,
    pub settings: ChaosSettings,
}

impl ChaosResponse {
    fn updated(settings: ChaosSettings) -> Self {
        Self {
            message: "Chaos configuration updated.",
            settings,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Replace every chaos parameter at once
pub async fn configure(
    State(state): State<AppState>,
    Query(params): Query<ConfigureChaosParams>,
) -> Json<ChaosResponse> {
    let applied = state.catalog.configure_chaos(params.into());
    Json(ChaosResponse::updated(applied))
}

/// Close the breaker and restore default chaos settings
pub async fn reset(State(state): State<AppState>) -> Json<ChaosResponse> {
    Json(ChaosResponse::updated(state.catalog.reset_chaos()))
}

/// Empty the result cache
pub async fn clear_cache(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    state.catalog.clear_cache().await?;
    Ok(Json(MessageResponse {
        message: "Cache cleared successfully.".to_string(),
    }))
}

/// Query parameters of `/chaos/leak`
#[derive(Debug, Clone, Deserialize)]
pub struct LeakParams {
    #[serde(default = "default_leak_items")]
    pub items: usize,
}

const fn default_leak_items() -> usize {
    1_000
}

/// Ballast growth report
#[derive(Debug, Clone, Serialize)]
pub struct LeakResponse {
    pub message: String,
    pub total_items: usize,
}

/// Grow the process memory ballast
pub async fn leak(
    State(state): State<AppState>,
    Query(params): Query<LeakParams>,
) -> Json<LeakResponse> {
    let report = state.catalog.simulate_leak(params.items);
    Json(LeakResponse {
        message: format!("Injected {}KB into memory.", report.injected_kb),
        total_items: report.total_items,
    })
}
