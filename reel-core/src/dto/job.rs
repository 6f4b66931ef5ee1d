//! Job DTOs returned by the HTTP API

use serde::{Deserialize, Serialize};

use crate::domain::job::{Job, JobId, JobStatus};

/// Response to a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreated {
    pub job_id: JobId,
}

/// Read-only projection of a job for pollers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusView {
    pub job_id: JobId,
    pub status: JobStatus,
    pub logs: Vec<String>,
    pub result_available: bool,
}

impl From<&Job> for JobStatusView {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.id(),
            status: job.status(),
            logs: job.logs().to_vec(),
            result_available: job.result().is_some(),
        }
    }
}
