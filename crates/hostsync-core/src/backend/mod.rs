// # Directory Backend Implementations
//
// This module provides implementations of the DirectoryBackend trait for
// different persistence strategies.

pub mod file;
pub mod memory;

pub use file::FileDirectoryBackend;
pub use memory::MemoryDirectoryBackend;
