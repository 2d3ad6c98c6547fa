//! Host directory service
//!
//! The facade request handlers call. Each mutation runs
//! "load → mutate → persist → regenerate → reload" inside one critical
//! section, so concurrent mutations cannot overwrite each other's changes.
//! Reads take no lock.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::backend::{FileDirectoryBackend, MemoryDirectoryBackend};
use crate::config::{ArtifactConfig, HostSyncConfig, ReloadConfig, StorageConfig};
use crate::error::Result;
use crate::reload::{CommandReload, NoopReload};
use crate::sink::{FileArtifactSink, MemoryArtifactSink};
use crate::store::RecordStore;
use crate::sync::SyncOrchestrator;
use crate::traits::{ArtifactSink, DirectoryBackend, ReloadTrigger};
use crate::types::{Applied, HostRecord, SyncReport, SyncStatus};

/// Record store plus sync orchestrator behind a single writer lock
pub struct HostDirectory {
    store: RecordStore,
    sync: SyncOrchestrator,
    write_lock: Mutex<()>,
}

impl HostDirectory {
    /// Assemble a directory service from its parts
    pub fn new(store: RecordStore, sync: SyncOrchestrator) -> Self {
        Self {
            store,
            sync,
            write_lock: Mutex::new(()),
        }
    }

    /// Build backend, sink and reload from configuration
    pub async fn from_config(config: &HostSyncConfig) -> Result<Self> {
        config.validate()?;

        let backend: Arc<dyn DirectoryBackend> = match &config.storage {
            StorageConfig::File { path } => Arc::new(FileDirectoryBackend::open(path).await?),
            StorageConfig::Memory => Arc::new(MemoryDirectoryBackend::new()),
        };
        let sink: Arc<dyn ArtifactSink> = match &config.artifact {
            ArtifactConfig::File { path } => Arc::new(FileArtifactSink::new(path)),
            ArtifactConfig::Memory => Arc::new(MemoryArtifactSink::new()),
        };
        let reload: Arc<dyn ReloadTrigger> = match &config.reload {
            ReloadConfig::Command {
                command,
                timeout_secs,
            } => Arc::new(CommandReload::new(command, *timeout_secs)),
            ReloadConfig::None => Arc::new(NoopReload),
        };

        let store = RecordStore::new(backend, config.directory);
        let sync = SyncOrchestrator::new(store.clone(), sink, reload);
        Ok(Self::new(store, sync))
    }

    /// All records in storage order
    pub async fn list(&self) -> Result<Vec<HostRecord>> {
        self.store.list().await
    }

    /// Find a record by host name
    pub async fn find_by_host(&self, host: &str) -> Result<HostRecord> {
        self.store.find_by_host(host).await
    }

    /// Find a record by id
    pub async fn find_by_id(&self, id: u64) -> Result<HostRecord> {
        self.store.find_by_id(id).await
    }

    /// Insert a record, then synchronize
    pub async fn add(&self, host: &str, ip: &str) -> Result<Applied<HostRecord>> {
        let _guard = self.write_lock.lock().await;
        let record = self.store.insert(host, ip).await?;
        Ok(self.applied(record).await)
    }

    /// Edit a record, then synchronize
    pub async fn edit(&self, id: u64, host: &str, ip: &str) -> Result<Applied<HostRecord>> {
        let _guard = self.write_lock.lock().await;
        let record = self.store.update(id, host, ip).await?;
        Ok(self.applied(record).await)
    }

    /// Delete a record, then synchronize
    pub async fn delete(&self, id: u64) -> Result<Applied<bool>> {
        let _guard = self.write_lock.lock().await;
        let removed = self.store.delete(id).await?;
        Ok(self.applied(removed).await)
    }

    /// Regenerate the hosts file and reload the service on demand
    pub async fn synchronize(&self) -> Result<SyncReport> {
        let _guard = self.write_lock.lock().await;
        self.sync.synchronize().await
    }

    /// Pair a durable mutation result with the sync outcome
    ///
    /// Must be called with the write lock held.
    async fn applied<T>(&self, value: T) -> Applied<T> {
        let sync = match self.sync.synchronize().await {
            Ok(report) => SyncStatus::Synced(report),
            Err(e) => {
                warn!("Change saved but hosts file not synchronized: {}", e);
                SyncStatus::Failed(e.to_string())
            }
        };
        Applied { value, sync }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirectoryPolicy;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_from_config_with_files() {
        let dir = tempdir().unwrap();
        let db = dir.path().join("db.json");
        let hosts = dir.path().join("dnsmasq.hosts");

        let config = HostSyncConfig {
            storage: StorageConfig::File {
                path: db.display().to_string(),
            },
            artifact: ArtifactConfig::File {
                path: hosts.display().to_string(),
            },
            reload: ReloadConfig::None,
            directory: DirectoryPolicy::default(),
            sync_on_start: false,
        };

        let directory = HostDirectory::from_config(&config).await.unwrap();
        let applied = directory.add("nas.local", "192.168.1.10").await.unwrap();

        assert!(applied.sync.is_synced());
        assert_eq!(applied.value.id, 1);
        assert_eq!(
            std::fs::read_to_string(&hosts).unwrap(),
            "192.168.1.10 nas.local\n"
        );
        assert!(std::fs::read_to_string(&db).unwrap().contains("nas.local"));
    }

    #[tokio::test]
    async fn test_from_config_rejects_invalid() {
        let config = HostSyncConfig {
            storage: StorageConfig::File {
                path: String::new(),
            },
            ..HostSyncConfig::default()
        };

        assert!(HostDirectory::from_config(&config).await.is_err());
    }
}
