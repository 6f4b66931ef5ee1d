//! Generation executor
//!
//! Runs a [`GenerationCommand`] to completion. The trait lets the runner be
//! exercised without a real generation script.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;

use crate::runner::command::GenerationCommand;

/// How the external program terminated
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Last `max_lines` non-empty lines of stderr
    pub fn stderr_tail(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self
            .stderr
            .lines()
            .filter(|l| !l.trim().is_empty())
            .collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("\n")
    }
}

/// Executes generation commands
#[async_trait]
pub trait GenerationExecutor: Send + Sync {
    /// Runs `command` and waits for it to exit
    ///
    /// Returns an error only when the program could not be launched or
    /// waited on; a non-zero exit is reported through the outcome.
    async fn execute(&self, command: &GenerationCommand) -> Result<ExecutionOutcome>;
}

/// Executor backed by a child process
///
/// stdout is inherited so script progress shows up in the server output;
/// stderr is captured for the job logs. Dropping the future kills the child.
pub struct ProcessExecutor;

#[async_trait]
impl GenerationExecutor for ProcessExecutor {
    async fn execute(&self, command: &GenerationCommand) -> Result<ExecutionOutcome> {
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to launch {}", command.program))?;

        Ok(ExecutionOutcome {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
