use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use portfolio_core::PageViewModel;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    generated_utc: String,
    view: &'a PageViewModel,
}

/// Writes the view model as pretty JSON, replacing `path` atomically.
pub fn write_snapshot(path: &Path, view: &PageViewModel) -> Result<PathBuf, SnapshotError> {
    let snapshot = Snapshot {
        generated_utc: Utc::now().to_rfc3339(),
        view,
    };
    let content = serde_json::to_string_pretty(&snapshot)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| SnapshotError::Io(e.error))?;
    Ok(path.to_path_buf())
}
