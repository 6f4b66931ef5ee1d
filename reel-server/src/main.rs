//! Reel Server
//!
//! HTTP front-end for an external video generation script.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Repository: In-memory job registry
//! - Runner: One background task per job, driving the external script
//! - API: Submission, status polling and artifact download
//!
//! A `POST /generate` returns a job id right away; callers poll
//! `GET /status/{job_id}` until the job is finished or failed.

mod api;
mod config;
mod repository;
mod runner;
mod service;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::JobRegistry;
use crate::runner::JobRunner;
use crate::runner::executor::ProcessExecutor;
use crate::service::JobService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reel_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reel Server...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    info!(
        "Loaded configuration: jobs_root={}, python_bin={}, job_timeout={:?}",
        config.jobs_root.display(),
        config.python_bin,
        config.job_timeout
    );

    tokio::fs::create_dir_all(&config.jobs_root)
        .await
        .with_context(|| format!("Failed to create {}", config.jobs_root.display()))?;

    let config = Arc::new(config);
    let registry = Arc::new(JobRegistry::new());
    let runner = Arc::new(JobRunner::new(
        Arc::clone(&registry),
        Arc::new(ProcessExecutor),
        Arc::clone(&config),
    ));
    let service = Arc::new(JobService::new(registry, runner));

    let app = api::create_router(service, &config.jobs_root);

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
