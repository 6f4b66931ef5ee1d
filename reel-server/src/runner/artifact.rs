//! Artifact discovery in a job's output directory

use std::io;
use std::path::{Path, PathBuf};

/// Extension of the files the generation scripts produce
pub const ARTIFACT_EXTENSION: &str = "mp4";

/// Returns the first `.mp4` file in `dir`, by file name order
pub async fn find_artifact(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut found: Option<PathBuf> = None;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != ARTIFACT_EXTENSION) {
            continue;
        }
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if found.as_ref().is_none_or(|current| path < *current) {
            found = Some(path);
        }
    }

    Ok(found)
}
