//! Test doubles and common utilities for directory contract tests
//!
//! The doubles wrap the in-memory implementations and add failure switches
//! and call counters, so tests can observe exactly which steps ran.

#![allow(dead_code)]

use hostsync_core::error::{Error, Result};
use hostsync_core::traits::{ArtifactSink, DirectoryBackend, ReloadTrigger};
use hostsync_core::{
    DirectoryPolicy, HostDirectory, HostRecord, MemoryArtifactSink, MemoryDirectoryBackend,
    RecordStore, SyncOrchestrator,
};
use hostsync_core::types::Directory;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A memory backend whose reads and writes can be made to fail
#[derive(Clone, Default)]
pub struct FlakyBackend {
    inner: MemoryDirectoryBackend,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    /// Yield to the scheduler between the caller's read and write
    yield_on_read: Arc<AtomicBool>,
    read_count: Arc<AtomicUsize>,
    write_count: Arc<AtomicUsize>,
}

impl FlakyBackend {
    pub fn with_hosts(hosts: Vec<HostRecord>) -> Self {
        Self {
            inner: MemoryDirectoryBackend::with_hosts(hosts),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn yield_on_read(&self, enabled: bool) {
        self.yield_on_read.store(enabled, Ordering::SeqCst);
    }

    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }

    pub async fn hosts(&self) -> Vec<HostRecord> {
        self.inner.snapshot().await.hosts
    }
}

#[async_trait::async_trait]
impl DirectoryBackend for FlakyBackend {
    async fn read(&self) -> Result<Directory> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::storage("injected read failure"));
        }
        let directory = self.inner.read().await?;
        if self.yield_on_read.load(Ordering::SeqCst) {
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
        }
        Ok(directory)
    }

    async fn write(&self, directory: &Directory) -> Result<()> {
        self.write_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::storage("injected write failure"));
        }
        self.inner.write(directory).await
    }
}

/// A memory sink that can be made to fail
#[derive(Clone, Default)]
pub struct FlakySink {
    pub inner: MemoryArtifactSink,
    fail: Arc<AtomicBool>,
    attempts: Arc<AtomicUsize>,
}

impl FlakySink {
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub async fn contents(&self) -> String {
        self.inner.contents_string().await
    }
}

#[async_trait::async_trait]
impl ArtifactSink for FlakySink {
    async fn replace(&self, contents: &[u8]) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::sync_failure("injected hosts file failure"));
        }
        self.inner.replace(contents).await
    }
}

/// A reload trigger that counts calls and can be made to fail
#[derive(Clone, Default)]
pub struct CountingReload {
    fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl CountingReload {
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ReloadTrigger for CountingReload {
    async fn reload(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::sync_failure("injected reload failure"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// A directory service wired to test doubles, plus handles to inspect them
pub struct Harness {
    pub directory: HostDirectory,
    pub backend: FlakyBackend,
    pub sink: FlakySink,
    pub reload: CountingReload,
}

impl Harness {
    pub fn new(hosts: Vec<HostRecord>) -> Self {
        Self::with_policy(hosts, DirectoryPolicy::default())
    }

    pub fn with_policy(hosts: Vec<HostRecord>, policy: DirectoryPolicy) -> Self {
        let backend = FlakyBackend::with_hosts(hosts);
        let sink = FlakySink::default();
        let reload = CountingReload::default();

        let store = RecordStore::new(Arc::new(backend.clone()), policy);
        let sync = SyncOrchestrator::new(
            store.clone(),
            Arc::new(sink.clone()),
            Arc::new(reload.clone()),
        );

        Self {
            directory: HostDirectory::new(store, sync),
            backend,
            sink,
            reload,
        }
    }
}
