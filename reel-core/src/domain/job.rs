//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::request::GenerationRequest;

/// Opaque job identifier
///
/// Rendered as 32 lowercase hex characters, the only form accepted by
/// [`FromStr`]; any other spelling of the same UUID is a different id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    /// Generates a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Id string not in the simple lowercase hex form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid job id: {0:?}")]
pub struct ParseJobIdError(String);

impl FromStr for JobId {
    type Err = ParseJobIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseJobIdError(s.to_string());
        let uuid = Uuid::try_parse(s).map_err(|_| invalid())?;
        if uuid.simple().to_string() != s {
            return Err(invalid());
        }
        Ok(Self(uuid))
    }
}

impl Serialize for JobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Job lifecycle status
///
/// `Queued -> Running -> {Finished | Error}`; the last two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Finished,
    Error,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Error)
    }

    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Queued, JobStatus::Running)
                | (JobStatus::Running, JobStatus::Finished)
                | (JobStatus::Running, JobStatus::Error)
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Finished => write!(f, "finished"),
            JobStatus::Error => write!(f, "error"),
        }
    }
}

/// Rejected state change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition from {from} to {to}")]
pub struct TransitionError {
    pub from: JobStatus,
    pub to: JobStatus,
}

/// Job record
///
/// `result` is set exactly when `status` is `Finished`, and `logs` only grows.
/// Fields are private so every change goes through the transition methods.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    id: JobId,
    status: JobStatus,
    logs: Vec<String>,
    result: Option<PathBuf>,
    request: GenerationRequest,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Creates a queued job
    pub fn new(id: JobId, request: GenerationRequest) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            logs: Vec::new(),
            result: None,
            request,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn result(&self) -> Option<&Path> {
        self.result.as_deref()
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Appends a diagnostic line
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
    }

    /// `Queued -> Running`
    pub fn start(&mut self) -> Result<(), TransitionError> {
        self.transition(JobStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// `Running -> Finished`, recording the produced artifact
    pub fn finish(&mut self, artifact: PathBuf) -> Result<(), TransitionError> {
        self.transition(JobStatus::Finished)?;
        self.result = Some(artifact);
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    /// `Running -> Error`, appending `message` to the logs
    ///
    /// A rejected transition leaves the logs untouched.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        self.transition(JobStatus::Error)?;
        self.push_log(message);
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job::new(JobId::new(), GenerationRequest::new("a cat"))
    }

    #[test]
    fn test_new_job_is_queued_and_empty() {
        let job = job();
        assert_eq!(job.status(), JobStatus::Queued);
        assert!(job.logs().is_empty());
        assert!(job.result().is_none());
        assert!(job.started_at().is_none());
    }

    #[test]
    fn test_happy_path() {
        let mut job = job();
        job.start().unwrap();
        assert_eq!(job.status(), JobStatus::Running);
        assert!(job.started_at().is_some());

        job.finish(PathBuf::from("jobs/x/out.mp4")).unwrap();
        assert_eq!(job.status(), JobStatus::Finished);
        assert_eq!(job.result(), Some(Path::new("jobs/x/out.mp4")));
        assert!(job.finished_at().is_some());
    }

    #[test]
    fn test_failure_records_log() {
        let mut job = job();
        job.start().unwrap();
        job.fail("exit status 1").unwrap();

        assert_eq!(job.status(), JobStatus::Error);
        assert_eq!(job.logs(), ["exit status 1".to_string()]);
        assert!(job.result().is_none());
    }

    #[test]
    fn test_cannot_finish_from_queued() {
        let mut job = job();
        let err = job.finish(PathBuf::from("out.mp4")).unwrap_err();
        assert_eq!(err.from, JobStatus::Queued);
        assert_eq!(err.to, JobStatus::Finished);
        assert!(job.result().is_none());
    }

    #[test]
    fn test_terminal_states_do_not_regress() {
        let mut job = job();
        job.start().unwrap();
        job.finish(PathBuf::from("out.mp4")).unwrap();

        assert!(job.start().is_err());
        assert!(job.fail("late failure").is_err());
        assert_eq!(job.status(), JobStatus::Finished);
        assert!(job.logs().is_empty());
        assert!(JobStatus::Finished.is_terminal());
        assert!(JobStatus::Error.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Finished).unwrap(),
            "\"finished\""
        );
        assert_eq!(JobStatus::Queued.to_string(), "queued");
    }

    #[test]
    fn test_job_id_format() {
        let id = JobId::new();
        let rendered = id.to_string();

        assert_eq!(rendered.len(), 32);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(rendered.parse::<JobId>().unwrap(), id);
        assert!("unknown-id-1234".parse::<JobId>().is_err());
    }

    #[test]
    fn test_job_id_rejects_other_uuid_spellings() {
        let id = JobId::new();
        let simple = id.to_string();
        let hyphenated = id.0.hyphenated().to_string();

        for other in [
            simple.to_uppercase(),
            hyphenated.clone(),
            format!("urn:uuid:{hyphenated}"),
            format!("{{{hyphenated}}}"),
        ] {
            assert!(other.parse::<JobId>().is_err(), "{other} should not parse");
        }
    }
}
