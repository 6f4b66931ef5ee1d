//! Job API Handlers
//!
//! Submission and status polling endpoints.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use reel_core::domain::request::GenerationRequest;
use reel_core::dto::job::{JobCreated, JobStatusView};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::service::JobService;

/// POST /generate
/// Queue a generation job and return its id without waiting for it
pub async fn generate(
    State(service): State<Arc<JobService>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResult<Json<JobCreated>> {
    let Json(request) = payload?;
    tracing::info!("Generation requested ({}): {:?}", request.mode(), request.prompt);

    let job_id = service.submit(request);
    Ok(Json(JobCreated { job_id }))
}

/// GET /status/{job_id}
pub async fn get_status(
    State(service): State<Arc<JobService>>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobStatusView>> {
    tracing::debug!("Getting status for job: {}", job_id);

    Ok(Json(service.status(&job_id)?))
}
