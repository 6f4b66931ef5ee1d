//! Job Registry
//!
//! Process-wide map from job id to job record. The map is guarded by a single
//! `RwLock`: inserts and updates take the write lock, lookups take the read
//! lock, so a reader never sees a half-applied update.

use reel_core::domain::job::{Job, JobId};
use reel_core::domain::request::GenerationRequest;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Registry error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("job {0} not found")]
    NotFound(JobId),
}

/// Thread-safe store of job records
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new queued job and returns its id
    ///
    /// The record is visible to `get` before this returns.
    pub fn create(&self, request: GenerationRequest) -> JobId {
        let mut jobs = self.write();
        loop {
            let id = JobId::new();
            if let Entry::Vacant(slot) = jobs.entry(id) {
                slot.insert(Job::new(id, request));
                return id;
            }
            tracing::warn!("Job id collision on {}, regenerating", id);
        }
    }

    /// Returns a snapshot of the job
    pub fn get(&self, id: JobId) -> Result<Job, RegistryError> {
        self.read()
            .get(&id)
            .cloned()
            .ok_or(RegistryError::NotFound(id))
    }

    /// Applies `mutation` to the job while holding the write lock
    pub fn update<R>(
        &self,
        id: JobId,
        mutation: impl FnOnce(&mut Job) -> R,
    ) -> Result<R, RegistryError> {
        let mut jobs = self.write();
        let job = jobs.get_mut(&id).ok_or(RegistryError::NotFound(id))?;
        Ok(mutation(job))
    }

    /// Number of jobs tracked since startup
    pub fn len(&self) -> usize {
        self.read().len()
    }

    // Every mutation is a single transition call, so a poisoned map still
    // holds consistent records.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<JobId, Job>> {
        self.jobs.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<JobId, Job>> {
        self.jobs.write().unwrap_or_else(PoisonError::into_inner)
    }
}
