// # Reload Trigger Trait
//
// Defines how the dependent name-resolution service is told to pick up a
// regenerated hosts file.
//
// ## Implementations
//
// - Shell command, e.g. `service dnsmasq restart` (`CommandReload`)
// - No-op, when nothing depends on the hosts file (`NoopReload`)

use async_trait::async_trait;

/// Trait for reload actions
///
/// # Trust Level: Untrusted
///
/// A reload is an opaque external action. The sync orchestrator calls it
/// exactly once per synchronization and never retries it; implementations
/// must not retry either, and must return within a bounded time.
#[async_trait]
pub trait ReloadTrigger: Send + Sync {
    /// Reload the dependent service
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The service was reloaded
    /// - `Err(Error)`: The reload failed or timed out
    async fn reload(&self) -> Result<(), crate::Error>;

    /// Get the trigger name (for logging/debugging)
    fn name(&self) -> &'static str;
}
