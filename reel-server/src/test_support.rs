//! Shared helpers for unit tests

use std::path::{Path, PathBuf};
use std::time::Duration;

use reel_core::domain::job::JobId;
use reel_core::dto::job::JobStatusView;

use crate::config::Config;
use crate::service::JobService;

/// Stub script that writes `out.mp4` and records the prompt it received
pub const SUCCEEDING_SCRIPT: &str = r#"
out=""
prompt=""
while [ "$#" -gt 0 ]; do
  case "$1" in
    --out_dir) out="$2"; shift 2 ;;
    --prompt) prompt="$2"; shift 2 ;;
    *) shift ;;
  esac
done
printf '%s' "$prompt" > "$out/prompt.txt"
printf 'video' > "$out/out.mp4"
"#;

/// Stub script that fails like an out-of-memory generation run
pub const FAILING_SCRIPT: &str = r#"
echo "RuntimeError: CUDA out of memory" >&2
exit 1
"#;

/// Config rooted at `jobs_root` with scripts that do not exist
pub fn config(jobs_root: &Path) -> Config {
    Config {
        jobs_root: jobs_root.to_path_buf(),
        ..Config::default()
    }
}

/// Config that runs `script_body` through `/bin/sh` for both modes
pub fn stub_config(dir: &Path, script_body: &str) -> Config {
    let script = write_script(dir, "generate.sh", script_body);
    Config {
        jobs_root: dir.join("jobs"),
        python_bin: "/bin/sh".to_string(),
        t2v_script: script.clone(),
        i2v_script: script,
        ..Config::default()
    }
}

pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// Polls until the job is terminal, returning every distinct status seen
pub async fn poll_until_terminal(service: &JobService, id: JobId) -> Vec<JobStatusView> {
    let mut seen: Vec<JobStatusView> = Vec::new();
    for _ in 0..500 {
        let view = service.status(&id.to_string()).unwrap();
        let terminal = view.status.is_terminal();
        if seen.last().is_none_or(|last| last.status != view.status) {
            seen.push(view);
        }
        if terminal {
            return seen;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} did not reach a terminal state");
}
