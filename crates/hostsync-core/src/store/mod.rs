//! Record store
//!
//! Validated list/find/insert/update/delete over a [`DirectoryBackend`].
//! Every call loads a fresh snapshot of the directory; every mutation writes
//! the whole directory back before returning. The store never regenerates the
//! hosts file itself; that is the caller's job (see [`crate::HostDirectory`]).

pub mod allocator;

pub use allocator::IdAllocator;

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DirectoryPolicy;
use crate::error::{Error, Result};
use crate::traits::DirectoryBackend;
use crate::types::{Directory, HostRecord};

/// Durable collection of host records
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn DirectoryBackend>,
    allocator: IdAllocator,
    enforce_unique_on_edit: bool,
}

impl RecordStore {
    /// Create a record store over `backend`
    pub fn new(backend: Arc<dyn DirectoryBackend>, policy: DirectoryPolicy) -> Self {
        Self {
            backend,
            allocator: IdAllocator::new(policy.id_allocation),
            enforce_unique_on_edit: policy.enforce_unique_on_edit,
        }
    }

    /// Load and return all records in storage order
    pub async fn list(&self) -> Result<Vec<HostRecord>> {
        Ok(self.load().await?.hosts)
    }

    /// Find a record by host name
    pub async fn find_by_host(&self, host: &str) -> Result<HostRecord> {
        self.load()
            .await?
            .find_by_host(host)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("host {}", host)))
    }

    /// Find a record by id
    pub async fn find_by_id(&self, id: u64) -> Result<HostRecord> {
        self.load()
            .await?
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("id {}", id)))
    }

    /// Append a new record and persist the directory
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `host` or `ip` cannot be written as a hosts line
    /// - `DuplicateHost` if a record with `host` already exists
    /// - `StorageUnavailable` if the directory cannot be loaded or written
    pub async fn insert(&self, host: &str, ip: &str) -> Result<HostRecord> {
        validate_entry(host, ip)?;

        let mut directory = self.load().await?;
        if directory.find_by_host(host).is_some() {
            debug!(host, "Rejecting duplicate host");
            return Err(Error::duplicate_host(host));
        }

        let id = self.allocator.next(&directory.hosts)?;
        let record = HostRecord::new(id, host, ip);
        directory.hosts.push(record.clone());
        self.backend.write(&directory).await?;

        info!(id = record.id, host = %record.host, ip = %record.ip, "Host added");
        Ok(record)
    }

    /// Overwrite `host` and `ip` of the record with `id` and persist
    ///
    /// The record keeps its id and its position. Uniqueness of the new host
    /// is only checked when the policy asks for it.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    ///
    /// - `StorageUnavailable` if the directory cannot be loaded
    /// - `NotFound` if no record has `id`
    /// - `InvalidInput` if `host` or `ip` cannot be written as a hosts line
    /// - `DuplicateHost` if enforced and another record already uses `host`
    /// - `StorageUnavailable` if the directory cannot be written
    pub async fn update(&self, id: u64, host: &str, ip: &str) -> Result<HostRecord> {
        let mut directory = self.load().await?;

        // Last match wins if ids were ever duplicated
        let position = directory
            .hosts
            .iter()
            .rposition(|record| record.id == id)
            .ok_or_else(|| Error::not_found(format!("id {}", id)))?;

        validate_entry(host, ip)?;

        if self.enforce_unique_on_edit
            && directory
                .hosts
                .iter()
                .any(|record| record.host == host && record.id != id)
        {
            debug!(id, host, "Rejecting edit onto an existing host");
            return Err(Error::duplicate_host(host));
        }

        let record = &mut directory.hosts[position];
        record.host = host.to_string();
        record.ip = ip.to_string();
        let updated = record.clone();

        self.backend.write(&directory).await?;

        info!(id, host = %updated.host, ip = %updated.ip, "Host updated");
        Ok(updated)
    }

    /// Remove every record with `id` and persist
    ///
    /// Returns `true` when at least one record was removed; when none
    /// matched the directory is not written and `NotFound` is returned.
    pub async fn delete(&self, id: u64) -> Result<bool> {
        let mut directory = self.load().await?;

        let before = directory.hosts.len();
        directory.hosts.retain(|record| record.id != id);
        let removed = before - directory.hosts.len();

        if removed == 0 {
            return Err(Error::not_found(format!("id {}", id)));
        }

        self.backend.write(&directory).await?;

        info!(id, removed, "Host deleted");
        Ok(true)
    }

    async fn load(&self) -> Result<Directory> {
        self.backend.read().await.map_err(|e| match e {
            Error::StorageUnavailable(_) => e,
            other => Error::storage(other.to_string()),
        })
    }
}

/// Reject values that would break the one-line-per-record hosts format
fn validate_entry(host: &str, ip: &str) -> Result<()> {
    if host.is_empty() {
        return Err(Error::invalid_input("host cannot be empty"));
    }
    if ip.is_empty() {
        return Err(Error::invalid_input("ip cannot be empty"));
    }
    for (field, value) in [("host", host), ("ip", ip)] {
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::invalid_input(format!(
                "{} cannot contain whitespace or control characters: {:?}",
                field, value
            )));
        }
    }
    Ok(())
}
