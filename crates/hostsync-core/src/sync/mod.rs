//! Sync orchestrator
//!
//! Regenerates the hosts file from the current directory, then reloads the
//! dependent service.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐   list()    ┌──────────────┐  render()  ┌──────────────┐
//! │ RecordStore │ ──────────▶ │ Orchestrator │ ─────────▶ │ ArtifactSink │
//! └─────────────┘             └──────────────┘            └──────────────┘
//!                                     │
//!                                     ▼ reload()
//!                             ┌───────────────┐
//!                             │ ReloadTrigger │
//!                             └───────────────┘
//! ```
//!
//! 1. Load the directory. On failure stop: the existing hosts file is stale
//!    but well-formed, which beats writing one from a failed read.
//! 2. Replace the hosts file with the rendered directory.
//! 3. Reload the service. A failure here does not roll back step 2; the file
//!    already matches the directory and only the live service lags behind
//!    until the next successful synchronization.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::artifact;
use crate::error::{Error, Result};
use crate::store::RecordStore;
use crate::traits::{ArtifactSink, ReloadTrigger};
use crate::types::SyncReport;

/// Sequences "regenerate hosts file, then reload service"
///
/// No retries: a failed synchronization is reported and left to the caller.
#[derive(Clone)]
pub struct SyncOrchestrator {
    store: RecordStore,
    sink: Arc<dyn ArtifactSink>,
    reload: Arc<dyn ReloadTrigger>,
}

impl SyncOrchestrator {
    /// Create a new orchestrator
    ///
    /// # Parameters
    ///
    /// - `store`: Source of the records to render
    /// - `sink`: Destination of the hosts file
    /// - `reload`: Action restarting the dependent service
    pub fn new(
        store: RecordStore,
        sink: Arc<dyn ArtifactSink>,
        reload: Arc<dyn ReloadTrigger>,
    ) -> Self {
        Self {
            store,
            sink,
            reload,
        }
    }

    /// Regenerate the hosts file and reload the service
    ///
    /// # Returns
    ///
    /// - `Ok(SyncReport)`: Both the write and the reload succeeded
    /// - `Err(Error::StorageUnavailable)`: The directory could not be loaded; nothing was written
    /// - `Err(Error::SyncFailure)`: The write or the reload failed
    pub async fn synchronize(&self) -> Result<SyncReport> {
        let records = self.store.list().await.inspect_err(|e| {
            warn!("Skipping hosts file regeneration, directory unreadable: {}", e);
        })?;

        let contents = artifact::render(&records);
        debug!(
            records = records.len(),
            bytes = contents.len(),
            "Rendered hosts file"
        );

        self.sink.replace(&contents).await.map_err(|e| {
            warn!("Failed to write hosts file: {}", e);
            into_sync_failure(e)
        })?;

        self.reload.reload().await.map_err(|e| {
            warn!(
                trigger = self.reload.name(),
                "Hosts file written but reload failed: {}", e
            );
            into_sync_failure(e)
        })?;

        let report = SyncReport {
            records: records.len(),
            bytes: contents.len(),
            completed_at: chrono::Utc::now(),
        };
        info!(
            records = report.records,
            trigger = self.reload.name(),
            "Hosts file synchronized"
        );
        Ok(report)
    }
}

fn into_sync_failure(err: Error) -> Error {
    match err {
        Error::SyncFailure(_) => err,
        other => Error::sync_failure(other.to_string()),
    }
}
