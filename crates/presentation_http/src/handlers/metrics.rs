//! Prometheus exposition endpoint

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{error::ApiError, state::AppState};

/// Content type of the Prometheus text format
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render all recorded metrics in Prometheus text format
///
/// Returns 503 when the server runs without a recorder.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::ServiceUnavailable {
        code: "metrics_disabled",
        message: "Metrics recorder not installed".to_string(),
    })?;

    Ok(([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], handle.render()).into_response())
}
