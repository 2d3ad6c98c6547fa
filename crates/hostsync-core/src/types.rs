//! Data types shared by every component
//!
//! - [`HostRecord`]: one host name to address mapping
//! - [`Directory`]: the whole persisted document
//! - [`SyncReport`] / [`SyncStatus`] / [`Applied`]: synchronization outcomes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single host name to address mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Unique id, assigned on insert and never changed afterwards
    pub id: u64,
    /// Host name (unique, case-sensitive)
    pub host: String,
    /// Network address, stored verbatim
    pub ip: String,
}

impl HostRecord {
    /// Create a new host record
    pub fn new(id: u64, host: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            id,
            host: host.into(),
            ip: ip.into(),
        }
    }
}

/// The persisted host directory
///
/// Serialized as `{"hosts": [...]}`. Other top-level keys found in the
/// document are carried in `extra` and written back as they were read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    /// Records in insertion order
    #[serde(default)]
    pub hosts: Vec<HostRecord>,

    /// Unrelated top-level keys of the document
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Directory {
    /// Create a directory holding the given records
    pub fn new(hosts: Vec<HostRecord>) -> Self {
        Self {
            hosts,
            extra: Map::new(),
        }
    }

    /// Find a record by host name
    pub fn find_by_host(&self, host: &str) -> Option<&HostRecord> {
        self.hosts.iter().find(|record| record.host == host)
    }

    /// Find a record by id
    pub fn find_by_id(&self, id: u64) -> Option<&HostRecord> {
        self.hosts.iter().find(|record| record.id == id)
    }
}

/// Summary of a completed synchronization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Number of records written to the hosts file
    pub records: usize,
    /// Size of the rendered hosts file in bytes
    pub bytes: usize,
    /// When the reload finished
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Outcome of the synchronization chained after a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Hosts file rewritten and service reloaded
    Synced(SyncReport),
    /// The mutation is durable but the hosts file or service may be stale
    Failed(String),
}

impl SyncStatus {
    /// Whether the synchronization succeeded
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncStatus::Synced(_))
    }

    /// The failure message, if synchronization failed
    pub fn error(&self) -> Option<&str> {
        match self {
            SyncStatus::Synced(_) => None,
            SyncStatus::Failed(message) => Some(message),
        }
    }
}

/// Result of a mutation that was applied and then synchronized
///
/// The mutation is durable regardless of `sync`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    /// What the mutation produced
    pub value: T,
    /// How the follow-up synchronization went
    pub sync: SyncStatus,
}
