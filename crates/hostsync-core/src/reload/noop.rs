//! Reload that does nothing

use async_trait::async_trait;

use crate::Error;
use crate::traits::ReloadTrigger;

/// Reload for setups where nothing reads the hosts file
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReload;

#[async_trait]
impl ReloadTrigger for NoopReload {
    async fn reload(&self) -> Result<(), Error> {
        tracing::debug!("No reload configured, skipping");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
