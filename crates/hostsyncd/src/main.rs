// # hostsyncd - Host Directory Daemon
//
// This daemon is a THIN integration layer:
// - DO NOT add directory, rendering or reload logic here
// - All of that lives in hostsync-core
//
// The hostsyncd daemon is responsible for:
// 1. Reading configuration (environment variables or a JSON file)
// 2. Refusing to run without root, unless told otherwise
// 3. Building the directory service and synchronizing once at startup
// 4. Serving the HTTP API until SIGTERM/SIGINT
//
// ## Configuration
//
// - `HOSTSYNC_CONFIG`: JSON file with the full directory configuration (optional)
// - `HOSTSYNC_DATABASE`: Path to the host directory document (default `db.json`)
// - `HOSTSYNC_HOSTS_FILE`: Path to the generated hosts file (default `/etc/dnsmasq.hosts`)
// - `HOSTSYNC_RELOAD_COMMAND`: Reload command (default `service dnsmasq restart`, empty disables)
// - `HOSTSYNC_RELOAD_TIMEOUT_SECS`: Reload timeout (default 30)
// - `HOSTSYNC_ID_ALLOCATION`: `last` (default) or `max`
// - `HOSTSYNC_UNIQUE_ON_EDIT`: Reject edits onto an existing host name (default false)
// - `HOSTSYNC_SYNC_ON_START`: Regenerate the hosts file at startup (default true)
// - `HOSTSYNC_LISTEN`: Listen address (default `0.0.0.0:4000`)
// - `HOSTSYNC_LOG_LEVEL`: trace, debug, info, warn, error (default info)
// - `HOSTSYNC_REQUIRE_ROOT`: Refuse to start unless running as root (default true)
//
// ## Example
//
// ```bash
// export HOSTSYNC_DATABASE=/var/lib/hostsync/db.json
// export HOSTSYNC_HOSTS_FILE=/etc/dnsmasq.hosts
//
// hostsyncd
// ```

mod config;
mod http;

use anyhow::Result;
use hostsync_core::HostDirectory;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum HostsyncExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<HostsyncExitCode> for ExitCode {
    fn from(code: HostsyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return HostsyncExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return HostsyncExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return HostsyncExitCode::ConfigError.into();
    }

    if config.require_root && !running_as_root() {
        error!("This daemon needs root permissions. Run it as root or set HOSTSYNC_REQUIRE_ROOT=false");
        return HostsyncExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HostsyncExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match start(&config).await {
            Ok((directory, listener)) => {
                if let Err(e) = serve(directory, listener).await {
                    error!("Daemon error: {:#}", e);
                    HostsyncExitCode::RuntimeError
                } else {
                    HostsyncExitCode::CleanShutdown
                }
            }
            Err(e) => {
                error!("Startup failed: {:#}", e);
                HostsyncExitCode::ConfigError
            }
        }
    })
    .into()
}

/// Build the directory service and bind the listener
async fn start(config: &Config) -> Result<(Arc<HostDirectory>, TcpListener)> {
    let core_config = config.host_sync_config()?;
    let directory = Arc::new(HostDirectory::from_config(&core_config).await?);

    if core_config.sync_on_start {
        match directory.synchronize().await {
            Ok(report) => info!(records = report.records, "Initial synchronization complete"),
            Err(e) => warn!("Initial synchronization failed (continuing): {}", e),
        }
    }

    let listener = TcpListener::bind(config.listen).await?;
    info!("API server started: http://{}", listener.local_addr()?);

    Ok((directory, listener))
}

/// Serve the HTTP API until a shutdown signal arrives
async fn serve(directory: Arc<HostDirectory>, listener: TcpListener) -> Result<()> {
    axum::serve(listener, http::router(directory))
        .with_graceful_shutdown(async {
            match wait_for_shutdown().await {
                Ok(signal) => info!("Received shutdown signal: {}", signal),
                Err(e) => error!("Signal handling failed, shutting down: {}", e),
            }
        })
        .await?;

    info!("Shutting down daemon");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}

#[cfg(unix)]
fn running_as_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn running_as_root() -> bool {
    true
}
