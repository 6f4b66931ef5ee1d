//! Generation command construction
//!
//! Builds the argument vector for the external generation script. Values are
//! passed as discrete arguments and never go through a shell, so prompt text
//! cannot change which program runs or with what other arguments.

use reel_core::domain::request::{GenerationMode, GenerationRequest};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// A fully resolved invocation of the generation script
#[derive(Debug, Clone)]
pub struct GenerationCommand {
    pub program: String,
    pub args: Vec<OsString>,
    /// Directory the script was told to write into
    pub out_dir: PathBuf,
}

impl GenerationCommand {
    pub fn build(config: &Config, request: &GenerationRequest, out_dir: &Path) -> Self {
        let script = match request.mode() {
            GenerationMode::TextToVideo => &config.t2v_script,
            GenerationMode::ImageToVideo => &config.i2v_script,
        };

        let mut args: Vec<OsString> = vec![script.into()];
        let mut flag = |name: &str, value: OsString| {
            args.push(format!("--{name}").into());
            args.push(value);
        };

        flag("prompt", request.prompt.clone().into());
        flag("out_dir", out_dir.into());
        flag("duration", request.duration.to_string().into());
        flag("fps", request.fps.to_string().into());
        flag("resolution", request.resolution.clone().into());
        if let Some(style) = request.effective_style() {
            flag("style", style.into());
        }
        if let Some(seed) = request.effective_seed() {
            flag("seed", seed.to_string().into());
        }
        flag(
            "num_inference_steps",
            request.num_inference_steps.to_string().into(),
        );
        // Always keep a decimal point so 7.0 is sent as "7.0", not "7".
        flag("scale", format!("{:?}", request.scale).into());

        Self {
            program: config.python_bin.clone(),
            args,
            out_dir: out_dir.to_path_buf(),
        }
    }

    /// Process builder for this invocation
    pub fn to_command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl std::fmt::Display for GenerationCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {:?}", arg)?;
        }
        Ok(())
    }
}
