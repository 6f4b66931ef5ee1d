//! Job Runner
//!
//! Drives one job through `queued -> running -> {finished | error}`:
//! - Creates the job's output directory under the jobs root
//! - Launches the generation script and waits for it, optionally bounded by a timeout
//! - Looks for the produced artifact and records the outcome in the registry
//!
//! Each job runs in its own tokio task; failures are recorded on the job and
//! never propagate to other jobs or to the HTTP caller.

pub mod artifact;
pub mod command;
pub mod executor;

use anyhow::{Context, Result, anyhow, bail};
use reel_core::domain::job::{Job, JobId, TransitionError};
use reel_core::domain::request::GenerationRequest;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::repository::JobRegistry;
use crate::runner::artifact::find_artifact;
use crate::runner::command::GenerationCommand;
use crate::runner::executor::GenerationExecutor;

/// Lines of stderr kept in the job log when the script fails
const STDERR_TAIL_LINES: usize = 20;

/// Executes jobs recorded in the registry
pub struct JobRunner {
    registry: Arc<JobRegistry>,
    executor: Arc<dyn GenerationExecutor>,
    config: Arc<Config>,
}

impl JobRunner {
    pub fn new(
        registry: Arc<JobRegistry>,
        executor: Arc<dyn GenerationExecutor>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            registry,
            executor,
            config,
        }
    }

    /// Output directory owned by the job
    pub fn output_dir(&self, id: JobId) -> PathBuf {
        self.config.jobs_root.join(id.to_string())
    }

    /// Runs the job in the background
    ///
    /// The returned handle resolves once the job has reached a terminal
    /// state. A panic inside the job task is recorded as an `error`.
    pub fn spawn(self: &Arc<Self>, id: JobId) -> JoinHandle<()> {
        let runner = Arc::clone(self);
        let task = tokio::spawn({
            let runner = Arc::clone(&runner);
            async move { runner.run(id).await }
        });

        tokio::spawn(async move {
            if let Err(e) = task.await {
                warn!("Job task {} panicked: {}", id, e);
                runner.record(id, |job| job.fail(format!("Job execution aborted: {e}")));
            }
        })
    }

    /// Runs the job to completion on the current task
    pub async fn run(&self, id: JobId) {
        let request = match self.registry.update(id, |job| {
            job.start().map(|_| job.request().clone())
        }) {
            Ok(Ok(request)) => request,
            Ok(Err(e)) => {
                warn!("Job {} not started: {}", id, e);
                return;
            }
            Err(e) => {
                error!("Cannot run job {}: {}", id, e);
                return;
            }
        };

        info!("Job {} running ({})", id, request.mode());

        match self.generate(id, &request).await {
            Ok(artifact) => {
                info!("Job {} finished: {}", id, artifact.display());
                self.record(id, |job| job.finish(artifact));
            }
            Err(e) => {
                error!("Job {} failed: {:#}", id, e);
                self.record(id, |job| job.fail(format!("{e:#}")));
            }
        }
    }

    async fn generate(&self, id: JobId, request: &GenerationRequest) -> Result<PathBuf> {
        let out_dir = self.output_dir(id);
        tokio::fs::create_dir_all(&out_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

        let command = GenerationCommand::build(&self.config, request, &out_dir);
        debug!("Job {} executing: {}", id, command);

        let outcome = match self.config.job_timeout {
            Some(limit) => tokio::time::timeout(limit, self.executor.execute(&command))
                .await
                .map_err(|_| anyhow!("Generation timed out after {}s", limit.as_secs()))??,
            None => self.executor.execute(&command).await?,
        };

        if !outcome.success() {
            let status = match outcome.exit_code {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            };
            let stderr = outcome.stderr_tail(STDERR_TAIL_LINES);
            if stderr.is_empty() {
                bail!("Generation command failed with {}", status);
            }
            bail!("Generation command failed with {}: {}", status, stderr);
        }

        find_artifact(&command.out_dir)
            .await
            .with_context(|| format!("Failed to scan output directory {}", out_dir.display()))?
            .ok_or_else(|| {
                anyhow!(
                    "Generation reported success but no .{} file was found in {}",
                    artifact::ARTIFACT_EXTENSION,
                    out_dir.display()
                )
            })
    }

    fn record(&self, id: JobId, transition: impl FnOnce(&mut Job) -> Result<(), TransitionError>) {
        match self.registry.update(id, transition) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Job {}: {}", id, e),
            Err(e) => error!("Job {} vanished from registry: {}", id, e),
        }
    }
}
