// # Artifact Sink Trait
//
// Defines where the rendered hosts file goes.
//
// The sink only ever receives complete files. It is never read back by the
// core: the directory is the source of truth and the hosts file is derived.

use async_trait::async_trait;

/// Trait for hosts file destinations
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Replace the hosts file with `contents`
    ///
    /// # Parameters
    ///
    /// - `contents`: The complete rendered file
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The new contents are in place
    /// - `Err(Error)`: Write failed; the previous contents may still be in place
    async fn replace(&self, contents: &[u8]) -> Result<(), crate::Error>;
}
