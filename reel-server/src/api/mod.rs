//! API Module
//!
//! HTTP API layer for the generation service.

pub mod error;
pub mod health;
pub mod job;

use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::service::JobService;

/// Create the main API router with all endpoints
///
/// Produced artifacts are served from `jobs_root` under `/files/{job_id}/{file}`.
pub fn create_router(service: Arc<JobService>, jobs_root: &Path) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/generate", post(job::generate))
        .route("/status/{job_id}", get(job::get_status))
        .nest_service("/files", ServeDir::new(jobs_root))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}
