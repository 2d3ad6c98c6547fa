// # File Artifact Sink
//
// Writes the hosts file read by the name-resolution service.
//
// The new contents go to a temporary file next to the target which is then
// renamed over it, so the service never reads a half-written file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::ArtifactSink;

/// Hosts file on disk
#[derive(Debug, Clone)]
pub struct FileArtifactSink {
    path: PathBuf,
}

impl FileArtifactSink {
    /// Create a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the hosts file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ArtifactSink for FileArtifactSink {
    async fn replace(&self, contents: &[u8]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::sync_failure(format!(
                    "Failed to create hosts file directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::sync_failure(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            file.write_all(contents).await.map_err(|e| {
                Error::sync_failure(format!(
                    "Failed to write hosts file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            file.flush().await.map_err(|e| {
                Error::sync_failure(format!(
                    "Failed to flush hosts file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::sync_failure(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = contents.len(),
            "Hosts file replaced"
        );
        Ok(())
    }
}
