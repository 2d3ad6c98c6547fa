//! Shell command reload
//!
//! Restarts the dependent service by running a command such as
//! `service dnsmasq restart` through `sh -c`.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{error, info};

use crate::Error;
use crate::traits::ReloadTrigger;

/// Runs a shell command to reload the dependent service
#[derive(Debug, Clone)]
pub struct CommandReload {
    command: String,
    timeout: Duration,
}

impl CommandReload {
    /// Create a reload running `command` with the given timeout
    pub fn new(command: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            command: command.into(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    async fn run(&self) -> anyhow::Result<()> {
        info!(command = %self.command, "Running reload command");

        let child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn reload command '{}'", self.command))?;

        // stderr is drained while waiting so a chatty command cannot fill
        // the pipe and stall; dropping the future on timeout kills the child
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output.context("failed to wait for reload command")?,
            Err(_) => {
                error!(command = %self.command, "Reload command timed out");
                return Err(anyhow!(
                    "reload command '{}' timed out after {}s",
                    self.command,
                    self.timeout.as_secs()
                ));
            }
        };

        if output.status.success() {
            info!(command = %self.command, "Reload command completed");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let code = output.status.code().unwrap_or(-1);
        error!(command = %self.command, code, "Reload command failed");
        Err(anyhow!(
            "reload command '{}' exited with code {}: {}",
            self.command,
            code,
            stderr.trim()
        ))
    }
}

#[async_trait]
impl ReloadTrigger for CommandReload {
    async fn reload(&self) -> Result<(), Error> {
        Ok(self.run().await?)
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        let reload = CommandReload::new("true", 5);
        reload.reload().await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_command_reports_exit_code() {
        let reload = CommandReload::new("echo boom >&2; exit 3", 5);
        let err = reload.reload().await.unwrap_err();

        assert!(matches!(err, Error::SyncFailure(_)));
        let message = err.to_string();
        assert!(message.contains("code 3"), "unexpected message: {}", message);
        assert!(message.contains("boom"), "unexpected message: {}", message);
    }

    #[tokio::test]
    async fn test_large_stderr_does_not_stall() {
        let reload = CommandReload::new("head -c 200000 /dev/zero >&2; exit 3", 5);
        let err = reload.reload().await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("code 3"), "unexpected message: {}", message);
        assert!(!message.contains("timed out"), "unexpected message: {}", message);
    }

    #[tokio::test]
    async fn test_timeout() {
        let reload = CommandReload::new("sleep 10", 1);
        let err = reload.reload().await.unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }
}
