// # Artifact Sink Implementations
//
// Destinations for the rendered hosts file.

pub mod file;
pub mod memory;

pub use file::FileArtifactSink;
pub use memory::MemoryArtifactSink;
