// # hostsync-core
//
// Core library for the host directory and its derived hosts file.
//
// ## Architecture Overview
//
// - **DirectoryBackend**: Trait for whole-document persistence of the host directory
// - **ArtifactSink**: Trait for replacing the derived hosts file
// - **ReloadTrigger**: Trait for restarting the dependent name-resolution service
// - **RecordStore**: Validated list/find/insert/update/delete over a backend
// - **IdAllocator**: Picks the id of a newly inserted record
// - **SyncOrchestrator**: Regenerates the hosts file, then reloads the service
// - **HostDirectory**: Serializes mutations and chains them with synchronization
//
// ## Design Principles
//
// 1. **Snapshot per operation**: Every operation loads the directory fresh; nothing is cached
// 2. **Pure rendering**: The hosts file is a function of the directory, never read back
// 3. **Injectable seams**: Storage, hosts file and reload are traits, with in-memory doubles
// 4. **Library-First**: The daemon is a thin transport over this crate

pub mod artifact;
pub mod backend;
pub mod config;
pub mod error;
pub mod reload;
pub mod service;
pub mod sink;
pub mod store;
pub mod sync;
pub mod traits;
pub mod types;

// Re-export core types for convenience
pub use traits::{ArtifactSink, DirectoryBackend, ReloadTrigger};
pub use backend::{FileDirectoryBackend, MemoryDirectoryBackend};
pub use sink::{FileArtifactSink, MemoryArtifactSink};
pub use reload::{CommandReload, NoopReload};
pub use store::{IdAllocator, RecordStore};
pub use sync::SyncOrchestrator;
pub use service::HostDirectory;
pub use config::{
    ArtifactConfig, DirectoryPolicy, HostSyncConfig, IdAllocation, ReloadConfig, StorageConfig,
};
pub use error::{Error, Result};
pub use types::{Applied, Directory, HostRecord, SyncReport, SyncStatus};
