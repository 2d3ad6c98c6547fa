// # Memory Artifact Sink
//
// Keeps the last rendered hosts file in memory.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::Error;
use crate::traits::ArtifactSink;

/// In-memory hosts file
///
/// Clones share the same contents and write counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryArtifactSink {
    contents: Arc<RwLock<Vec<u8>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryArtifactSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written contents
    pub async fn contents(&self) -> Vec<u8> {
        self.contents.read().await.clone()
    }

    /// Last written contents as text
    pub async fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.contents().await).into_owned()
    }

    /// Number of completed `replace` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactSink for MemoryArtifactSink {
    async fn replace(&self, contents: &[u8]) -> Result<(), Error> {
        let mut guard = self.contents.write().await;
        *guard = contents.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
