// # Memory Directory Backend
//
// In-memory implementation of DirectoryBackend.
//
// ## Purpose
//
// Provides a directory that doesn't persist across restarts. Useful for
// tests, and for running the daemon against a throwaway directory.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::DirectoryBackend;
use crate::types::{Directory, HostRecord};

/// In-memory directory backend
///
/// Clones share the same underlying document, so a test can keep a handle
/// and inspect what the store wrote.
///
/// # Example
///
/// ```rust,no_run
/// use hostsync_core::backend::MemoryDirectoryBackend;
/// use hostsync_core::traits::DirectoryBackend;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = MemoryDirectoryBackend::new();
///     let directory = backend.read().await?;
///     assert!(directory.hosts.is_empty());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectoryBackend {
    inner: Arc<RwLock<Directory>>,
}

impl MemoryDirectoryBackend {
    /// Create a new empty memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory backend preloaded with records
    pub fn with_hosts(hosts: Vec<HostRecord>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Directory::new(hosts))),
        }
    }

    /// Snapshot of the current document
    pub async fn snapshot(&self) -> Directory {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl DirectoryBackend for MemoryDirectoryBackend {
    async fn read(&self) -> Result<Directory, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn write(&self, directory: &Directory) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        *guard = directory.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_basic() {
        let backend = MemoryDirectoryBackend::new();
        assert!(backend.read().await.unwrap().hosts.is_empty());

        let directory = Directory::new(vec![HostRecord::new(1, "a", "1.1.1.1")]);
        backend.write(&directory).await.unwrap();

        assert_eq!(backend.read().await.unwrap(), directory);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let backend = MemoryDirectoryBackend::with_hosts(vec![HostRecord::new(1, "a", "1.1.1.1")]);
        let handle = backend.clone();

        backend.write(&Directory::default()).await.unwrap();

        assert!(handle.snapshot().await.hosts.is_empty());
    }
}
