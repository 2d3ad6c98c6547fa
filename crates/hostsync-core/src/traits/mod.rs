//! Core traits for the host directory
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`DirectoryBackend`]: Whole-document persistence of the host directory
//! - [`ArtifactSink`]: Full replacement of the derived hosts file
//! - [`ReloadTrigger`]: Restart of the dependent name-resolution service

pub mod artifact_sink;
pub mod directory_backend;
pub mod reload_trigger;

pub use artifact_sink::ArtifactSink;
pub use directory_backend::DirectoryBackend;
pub use reload_trigger::ReloadTrigger;
