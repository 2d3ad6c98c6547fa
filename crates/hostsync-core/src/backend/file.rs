// # File Directory Backend
//
// File-based implementation of DirectoryBackend.
//
// ## Durability
//
// - Atomic writes: Uses write-then-rename, so a reader sees either the old
//   or the new document, never a torn one
// - Backup: The previous document is copied to `.backup` before each rename
// - Corruption: A document that fails to parse is reported as
//   `StorageUnavailable`; it is never silently replaced
//
// ## File Format
//
// ```json
// {
//   "hosts": [
//     {
//       "id": 1,
//       "host": "nas.local",
//       "ip": "192.168.1.10"
//     }
//   ]
// }
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::Error;
use crate::traits::DirectoryBackend;
use crate::types::Directory;

/// File-based directory backend
///
/// # Example
///
/// ```rust,no_run
/// use hostsync_core::backend::FileDirectoryBackend;
/// use hostsync_core::traits::DirectoryBackend;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = FileDirectoryBackend::open("/var/lib/hostsync/db.json").await?;
///
///     let directory = backend.read().await?;
///     println!("{} hosts", directory.hosts.len());
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileDirectoryBackend {
    path: PathBuf,
}

impl FileDirectoryBackend {
    /// Open a directory document, creating it if needed
    ///
    /// This will:
    /// 1. Create parent directories if needed
    /// 2. Write an empty document (`{"hosts": []}`) if the file does not exist
    ///
    /// An existing file is left as it is, even if it does not parse; that
    /// surfaces on the first `read`.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::config(format!(
                    "Failed to create storage directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let backend = Self { path };

        if !backend.path.exists() {
            tracing::info!(
                path = %backend.path.display(),
                "Directory document missing, creating an empty one"
            );
            backend.write(&Directory::default()).await?;
        }

        Ok(backend)
    }

    /// Path of the directory document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get path to temporary file for atomic writes (`<path>.tmp`)
    fn temp_path(&self) -> PathBuf {
        with_suffix(&self.path, ".tmp")
    }

    /// Get path to backup file (`<path>.backup`)
    fn backup_path(path: &Path) -> PathBuf {
        with_suffix(path, ".backup")
    }
}

/// Append `suffix` to the file name, keeping any existing extension
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

#[async_trait]
impl DirectoryBackend for FileDirectoryBackend {
    async fn read(&self) -> Result<Directory, Error> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            Error::storage(format!(
                "Failed to read directory {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let directory: Directory = serde_json::from_str(&content).map_err(|e| {
            Error::storage(format!(
                "Failed to parse directory {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!(
            path = %self.path.display(),
            hosts = directory.hosts.len(),
            "Directory loaded"
        );
        Ok(directory)
    }

    async fn write(&self, directory: &Directory) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(directory)
            .map_err(|e| Error::storage(format!("Failed to serialize directory: {}", e)))?;

        // Write to temporary file first
        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::storage(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::storage(format!(
                    "Failed to write to temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::storage(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Keep the last good document around
        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::storage(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!(
            path = %self.path.display(),
            hosts = directory.hosts.len(),
            "Directory written"
        );
        Ok(())
    }
}
