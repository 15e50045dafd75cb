//! Product lookup and bulk traffic handlers

use application::{BulkSummary, CatalogResponse};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use domain::ProductId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Fetch one product through the resilience pipeline
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let id = ProductId::new(&product_id)?;
    let response = state.catalog.fetch_product(&id).await?;
    Ok(Json(response))
}

/// Query parameters of the bulk test
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkTestParams {
    /// Number of concurrent requests; falls back to the configured default
    pub requests: Option<usize>,
}

/// Bulk test result
#[derive(Debug, Clone, Serialize)]
pub struct BulkTestResponse {
    pub message: &'static str,
    pub summary: BulkSummary,
}

/// Fire concurrent requests at one product to provoke saturation
pub async fn bulk_test(
    State(state): State<AppState>,
    Query(params): Query<BulkTestParams>,
) -> Json<BulkTestResponse> {
    let requests = params
        .requests
        .unwrap_or(state.config.resilience.bulk_default_requests);
    let summary = state.catalog.bulk_test(requests).await;
    Json(BulkTestResponse {
        message: "Bulk test completed",
        summary,
    })
}
