// # Directory Backend Trait
//
// Defines the interface for persisting the host directory.
//
// ## Purpose
//
// The backend stores the directory as one document. Every operation of the
// record store reads the whole document, changes its own copy, and writes
// the whole document back. There are no partial updates.
//
// ## Implementations
//
// - File-based: JSON document (`FileDirectoryBackend`)
// - In-memory: tests and dry runs (`MemoryDirectoryBackend`)

use async_trait::async_trait;

use crate::types::Directory;

/// Trait for directory storage implementations
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Consistency
///
/// A `write` replaces the whole document. A `read` that follows a successful
/// `write` must observe exactly what was written. Whether a crash in the
/// middle of a `write` can leave a torn document is up to the implementation;
/// the file backend uses write-then-rename so it cannot.
#[async_trait]
pub trait DirectoryBackend: Send + Sync {
    /// Load the full directory
    ///
    /// # Returns
    ///
    /// - `Ok(Directory)`: The current document
    /// - `Err(Error::StorageUnavailable)`: The document could not be read or parsed
    async fn read(&self) -> Result<Directory, crate::Error>;

    /// Replace the full directory
    ///
    /// # Parameters
    ///
    /// - `directory`: The document to persist
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Successfully persisted
    /// - `Err(Error::StorageUnavailable)`: Storage error
    async fn write(&self, directory: &Directory) -> Result<(), crate::Error>;
}
