//! Health check handler and response type.

use crate::constants::SERVICE_NAME;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub bucket: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub backend: String,
}

/// Liveness plus the storage target this instance writes to
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let info = &state.storage_info;
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        bucket: info.bucket.clone(),
        region: info.region.clone(),
        endpoint: info.endpoint.clone(),
        backend: info.backend.to_string(),
    })
}
