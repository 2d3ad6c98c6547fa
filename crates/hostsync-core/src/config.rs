//! Configuration types for the host directory
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSyncConfig {
    /// Where the host directory document lives
    pub storage: StorageConfig,

    /// Where the derived hosts file is written
    pub artifact: ArtifactConfig,

    /// How the dependent service is reloaded
    #[serde(default)]
    pub reload: ReloadConfig,

    /// Directory mutation rules
    #[serde(default)]
    pub directory: DirectoryPolicy,

    /// Regenerate the hosts file once at startup
    #[serde(default = "default_sync_on_start")]
    pub sync_on_start: bool,
}

impl HostSyncConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            storage: StorageConfig::default(),
            artifact: ArtifactConfig::default(),
            reload: ReloadConfig::default(),
            directory: DirectoryPolicy::default(),
            sync_on_start: default_sync_on_start(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.storage.validate()?;
        self.artifact.validate()?;
        self.reload.validate()?;
        Ok(())
    }
}

impl Default for HostSyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Host directory storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// JSON document on disk
    File {
        /// Path to the directory document
        path: String,
    },

    /// In-memory directory (not persistent)
    Memory,
}

impl StorageConfig {
    /// Validate the storage configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StorageConfig::File { path } if path.is_empty() => {
                Err(crate::Error::config("Storage path cannot be empty"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File {
            path: "db.json".to_string(),
        }
    }
}

/// Hosts file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArtifactConfig {
    /// Hosts file on disk
    File {
        /// Path to the hosts file read by the name-resolution service
        path: String,
    },

    /// Keep the rendered hosts file in memory only
    Memory,
}

impl ArtifactConfig {
    /// Validate the hosts file configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ArtifactConfig::File { path } if path.is_empty() => {
                Err(crate::Error::config("Hosts file path cannot be empty"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        ArtifactConfig::File {
            path: "/etc/dnsmasq.hosts".to_string(),
        }
    }
}

/// Reload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadConfig {
    /// Run a shell command
    Command {
        /// Command passed to `sh -c`
        command: String,
        /// Kill the command after this many seconds
        #[serde(default = "default_reload_timeout_secs")]
        timeout_secs: u64,
    },

    /// No dependent service to reload
    None,
}

impl ReloadConfig {
    /// Validate the reload configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ReloadConfig::Command {
                command,
                timeout_secs,
            } => {
                if command.trim().is_empty() {
                    return Err(crate::Error::config("Reload command cannot be empty"));
                }
                if *timeout_secs == 0 {
                    return Err(crate::Error::config("Reload timeout must be > 0"));
                }
                Ok(())
            }
            ReloadConfig::None => Ok(()),
        }
    }
}

impl Default for ReloadConfig {
    fn default() -> Self {
        ReloadConfig::Command {
            command: default_reload_command(),
            timeout_secs: default_reload_timeout_secs(),
        }
    }
}

/// How ids are assigned to new records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdAllocation {
    /// Id of the last record in storage order, plus one
    ///
    /// Deleting the trailing record lets its id be issued again.
    #[default]
    LastRecord,
    /// Largest id in the directory, plus one
    Max,
}

impl std::str::FromStr for IdAllocation {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last" | "last_record" | "" => Ok(Self::LastRecord),
            "max" => Ok(Self::Max),
            other => Err(crate::Error::config(format!(
                "Invalid id allocation '{}'. Valid: last, max",
                other
            ))),
        }
    }
}

/// Rules applied by the record store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryPolicy {
    /// Id allocation strategy
    #[serde(default)]
    pub id_allocation: IdAllocation,

    /// Reject edits that rename a record onto another record's host
    #[serde(default)]
    pub enforce_unique_on_edit: bool,
}

fn default_sync_on_start() -> bool {
    true
}

fn default_reload_command() -> String {
    "service dnsmasq restart".to_string()
}

fn default_reload_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HostSyncConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.sync_on_start);
        assert_eq!(config.directory.id_allocation, IdAllocation::LastRecord);
        assert!(!config.directory.enforce_unique_on_edit);
    }

    #[test]
    fn test_rejects_empty_paths() {
        let mut config = HostSyncConfig::default();
        config.storage = StorageConfig::File {
            path: String::new(),
        };
        assert!(config.validate().is_err());

        let mut config = HostSyncConfig::default();
        config.artifact = ArtifactConfig::File {
            path: String::new(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_reload() {
        let reload = ReloadConfig::Command {
            command: "  ".to_string(),
            timeout_secs: 5,
        };
        assert!(reload.validate().is_err());

        let reload = ReloadConfig::Command {
            command: "true".to_string(),
            timeout_secs: 0,
        };
        assert!(reload.validate().is_err());
    }

    #[test]
    fn test_parse_from_json() {
        let raw = r#"{
            "storage": {"type": "file", "path": "/var/lib/hostsync/db.json"},
            "artifact": {"type": "file", "path": "/etc/dnsmasq.hosts"},
            "reload": {"type": "command", "command": "systemctl restart dnsmasq"},
            "directory": {"id_allocation": "max"}
        }"#;
        let config: HostSyncConfig = serde_json::from_str(raw).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.directory.id_allocation, IdAllocation::Max);
        assert!(config.sync_on_start);
        match config.reload {
            ReloadConfig::Command { timeout_secs, .. } => assert_eq!(timeout_secs, 30),
            ReloadConfig::None => panic!("expected command reload"),
        }
    }

    #[test]
    fn test_id_allocation_from_str() {
        assert_eq!("last".parse::<IdAllocation>().unwrap(), IdAllocation::LastRecord);
        assert_eq!("MAX".parse::<IdAllocation>().unwrap(), IdAllocation::Max);
        assert!("newest".parse::<IdAllocation>().is_err());
    }
}
