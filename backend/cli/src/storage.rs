//! Upload storage for inbound images.
//!
//! Files are written as `<unix-millis><original extension>` under the upload
//! directory. The stored path is handed to the analyzer as an opaque handle.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Open the store, creating the directory if missing.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create upload dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist one upload and return its stored path.
    pub async fn save(&self, original_name: Option<&str>, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(stored_file_name(
            Utc::now().timestamp_millis(),
            original_name,
        ));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write upload {}", path.display()))?;
        info!(path = %path.display(), size_bytes = bytes.len(), "Upload stored");
        Ok(path)
    }
}

/// Timestamp name that keeps the original extension, if any.
fn stored_file_name(millis: i64, original_name: Option<&str>) -> String {
    let ext = original_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{millis}{ext}")
}
