//! Daemon configuration
//!
//! Either a JSON file named by `HOSTSYNC_CONFIG` supplies the directory
//! configuration, or it is assembled from individual environment variables.
//! Listener, log level and the root check are always taken from the
//! environment.

use anyhow::{Context, Result};
use hostsync_core::{
    ArtifactConfig, DirectoryPolicy, HostSyncConfig, IdAllocation, ReloadConfig, StorageConfig,
};
use std::net::SocketAddr;

const DEFAULT_LISTEN: &str = "0.0.0.0:4000";
const DEFAULT_DATABASE: &str = "db.json";
const DEFAULT_HOSTS_FILE: &str = "/etc/dnsmasq.hosts";
const DEFAULT_RELOAD_COMMAND: &str = "service dnsmasq restart";
const DEFAULT_RELOAD_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub config_file: Option<String>,
    pub database: String,
    pub hosts_file: String,
    pub reload_command: String,
    pub reload_timeout_secs: u64,
    pub id_allocation: IdAllocation,
    pub unique_on_edit: bool,
    pub sync_on_start: bool,
    pub listen: SocketAddr,
    pub log_level: String,
    pub require_root: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen = lookup("HOSTSYNC_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string());

        Ok(Self {
            config_file: lookup("HOSTSYNC_CONFIG").filter(|s| !s.is_empty()),
            database: lookup("HOSTSYNC_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            hosts_file: lookup("HOSTSYNC_HOSTS_FILE")
                .unwrap_or_else(|| DEFAULT_HOSTS_FILE.to_string()),
            reload_command: lookup("HOSTSYNC_RELOAD_COMMAND")
                .unwrap_or_else(|| DEFAULT_RELOAD_COMMAND.to_string()),
            reload_timeout_secs: match lookup("HOSTSYNC_RELOAD_TIMEOUT_SECS") {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("HOSTSYNC_RELOAD_TIMEOUT_SECS is not a number: {}", raw))?,
                None => DEFAULT_RELOAD_TIMEOUT_SECS,
            },
            id_allocation: match lookup("HOSTSYNC_ID_ALLOCATION") {
                Some(raw) => raw.parse()?,
                None => IdAllocation::default(),
            },
            unique_on_edit: parse_flag(&lookup, "HOSTSYNC_UNIQUE_ON_EDIT", false)?,
            sync_on_start: parse_flag(&lookup, "HOSTSYNC_SYNC_ON_START", true)?,
            listen: listen
                .parse()
                .with_context(|| format!("HOSTSYNC_LISTEN is not a socket address: {}", listen))?,
            log_level: lookup("HOSTSYNC_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            require_root: parse_flag(&lookup, "HOSTSYNC_REQUIRE_ROOT", true)?,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "HOSTSYNC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        if self.config_file.is_none() {
            if self.database.is_empty() {
                anyhow::bail!("HOSTSYNC_DATABASE cannot be empty");
            }
            if self.hosts_file.is_empty() {
                anyhow::bail!("HOSTSYNC_HOSTS_FILE cannot be empty");
            }
            // The timeout only matters when there is a command to run
            if !self.reload_command.trim().is_empty()
                && !(1..=600).contains(&self.reload_timeout_secs)
            {
                anyhow::bail!(
                    "HOSTSYNC_RELOAD_TIMEOUT_SECS must be between 1 and 600 seconds. Got: {}",
                    self.reload_timeout_secs
                );
            }
        }

        Ok(())
    }

    /// Configuration for the core directory service
    pub fn host_sync_config(&self) -> Result<HostSyncConfig> {
        let config = match &self.config_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path))?;
                serde_json::from_str::<HostSyncConfig>(&raw)
                    .with_context(|| format!("Failed to parse config file {}", path))?
            }
            None => HostSyncConfig {
                storage: StorageConfig::File {
                    path: self.database.clone(),
                },
                artifact: ArtifactConfig::File {
                    path: self.hosts_file.clone(),
                },
                reload: if self.reload_command.trim().is_empty() {
                    ReloadConfig::None
                } else {
                    ReloadConfig::Command {
                        command: self.reload_command.clone(),
                        timeout_secs: self.reload_timeout_secs,
                    }
                },
                directory: DirectoryPolicy {
                    id_allocation: self.id_allocation,
                    enforce_unique_on_edit: self.unique_on_edit,
                },
                sync_on_start: self.sync_on_start,
            },
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{} must be true or false. Got: {}", key, raw),
        },
    }
}
