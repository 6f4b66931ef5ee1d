//! Job Service
//!
//! Submission and status polling for generation jobs.

use reel_core::domain::job::JobId;
use reel_core::domain::request::GenerationRequest;
use reel_core::dto::job::JobStatusView;
use std::sync::Arc;
use thiserror::Error;

use crate::repository::{JobRegistry, RegistryError};
use crate::runner::JobRunner;

/// Service error type
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Job {0} not found")]
    NotFound(String),
}

impl From<RegistryError> for JobError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => JobError::NotFound(id.to_string()),
        }
    }
}

pub struct JobService {
    registry: Arc<JobRegistry>,
    runner: Arc<JobRunner>,
}

impl JobService {
    pub fn new(registry: Arc<JobRegistry>, runner: Arc<JobRunner>) -> Self {
        Self { registry, runner }
    }

    /// Creates a queued job and schedules it without waiting for it
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, request: GenerationRequest) -> JobId {
        let id = self.registry.create(request);
        tracing::info!("Job {} queued ({} tracked)", id, self.registry.len());

        self.runner.spawn(id);
        id
    }

    /// Current status of a job
    ///
    /// Ids that do not parse are reported as not found.
    pub fn status(&self, raw_id: &str) -> Result<JobStatusView, JobError> {
        let id: JobId = raw_id
            .parse()
            .map_err(|_| JobError::NotFound(raw_id.to_string()))?;

        let job = self.registry.get(id)?;
        Ok(JobStatusView::from(&job))
    }
}
