//! Error types for the host directory
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for directory operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the host directory
#[derive(Error, Debug)]
pub enum Error {
    /// The directory document could not be read, parsed or written
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Insert (or a uniqueness-checked edit) would duplicate a host name
    #[error("Host already exists: {0}")]
    DuplicateHost(String),

    /// No record matched the requested id or host
    #[error("Host does not exist: {0}")]
    NotFound(String),

    /// Regenerating the hosts file or reloading the service failed
    #[error("Synchronization failed: {0}")]
    SyncFailure(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Create a duplicate host error
    pub fn duplicate_host(host: impl Into<String>) -> Self {
        Self::DuplicateHost(host.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a synchronization error
    pub fn sync_failure(msg: impl Into<String>) -> Self {
        Self::SyncFailure(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller caused this error (as opposed to the server side)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateHost(_) | Self::NotFound(_) | Self::InvalidInput(_)
        )
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::SyncFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::duplicate_host("a.local").is_client_error());
        assert!(Error::not_found("id 3").is_client_error());
        assert!(Error::invalid_input("empty host").is_client_error());
        assert!(!Error::storage("disk gone").is_client_error());
        assert!(!Error::sync_failure("reload").is_client_error());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::duplicate_host("a.local").to_string(),
            "Host already exists: a.local"
        );
        assert_eq!(
            Error::not_found("id 7").to_string(),
            "Host does not exist: id 7"
        );
    }
}
