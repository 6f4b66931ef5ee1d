//! Server configuration
//!
//! Defines the bind address, the jobs root and how the external generation
//! scripts are launched.

use std::path::PathBuf;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on (e.g., "0.0.0.0:5001")
    pub bind_addr: String,

    /// Directory holding one output directory per job
    pub jobs_root: PathBuf,

    /// Interpreter used to run the generation scripts
    pub python_bin: String,

    /// Text-to-video script
    pub t2v_script: PathBuf,

    /// Image-to-video script
    pub i2v_script: PathBuf,

    /// Maximum time a generation may run; `None` waits indefinitely
    pub job_timeout: Option<Duration>,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Every variable is optional and falls back to [`Config::default`]:
    /// - REEL_BIND_ADDR (default: 0.0.0.0:5001)
    /// - JOBS_ROOT (default: jobs)
    /// - PYTHON_BIN (default: python3)
    /// - T2V_SCRIPT (default: scripts/run_text2video.py)
    /// - I2V_SCRIPT (default: scripts/run_image2video.py)
    /// - JOB_TIMEOUT (seconds, default: unset)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("REEL_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let jobs_root = std::env::var("JOBS_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.jobs_root);

        let python_bin = std::env::var("PYTHON_BIN").unwrap_or(defaults.python_bin);

        let t2v_script = std::env::var("T2V_SCRIPT")
            .map(PathBuf::from)
            .unwrap_or(defaults.t2v_script);

        let i2v_script = std::env::var("I2V_SCRIPT")
            .map(PathBuf::from)
            .unwrap_or(defaults.i2v_script);

        let job_timeout = match std::env::var("JOB_TIMEOUT") {
            Ok(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("JOB_TIMEOUT must be a number of seconds"))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self {
            bind_addr,
            jobs_root,
            python_bin,
            t2v_script,
            i2v_script,
            job_timeout,
        })
    }

    /// Sets the generation timeout
    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.job_timeout = Some(timeout);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.jobs_root.as_os_str().is_empty() {
            anyhow::bail!("jobs_root cannot be empty");
        }

        if self.python_bin.is_empty() {
            anyhow::bail!("python_bin cannot be empty");
        }

        if self.t2v_script.as_os_str().is_empty() || self.i2v_script.as_os_str().is_empty() {
            anyhow::bail!("generation script paths cannot be empty");
        }

        if self.job_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("job_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5001".to_string(),
            jobs_root: PathBuf::from("jobs"),
            python_bin: "python3".to_string(),
            t2v_script: PathBuf::from("scripts/run_text2video.py"),
            i2v_script: PathBuf::from("scripts/run_image2video.py"),
            job_timeout: None,
        }
    }
}
