//! Daemon startup and shutdown

use crate::config::DaemonConfig;
use crate::error::{DaemonError, Result};
use chord_decoder::PluginRegistry;
use chord_replaygain::ReplayGainConfig;
use std::sync::Arc;
use tracing::info;

/// Everything built once at startup and read-only afterwards
pub struct Daemon {
    pub config: DaemonConfig,

    /// Passed by reference to output code; never mutated after startup
    pub replay_gain: ReplayGainConfig,

    /// Shared by every scan worker
    pub registry: Arc<PluginRegistry>,
}

impl Daemon {
    /// Validate settings and initialize decoder plugins
    ///
    /// Any bad configuration value aborts startup here, never later during
    /// a scan.
    pub fn start(config: DaemonConfig) -> Result<Self> {
        let replay_gain = ReplayGainConfig::from_block(&config.replay_gain)?;

        let mut registry = PluginRegistry::with_builtin()?;
        registry.init_all(|name| config.decoder_block(name))?;

        info!(
            plugins = registry.active_plugins().count(),
            replay_gain = replay_gain.mode.as_str(),
            "Daemon started"
        );

        Ok(Self {
            config,
            replay_gain,
            registry: Arc::new(registry),
        })
    }

    /// Finish decoder plugins
    ///
    /// Fails with `Busy` while scan workers still hold the registry.
    pub fn shutdown(self) -> Result<()> {
        let mut registry = Arc::try_unwrap(self.registry).map_err(|_| DaemonError::Busy)?;
        registry.finish_all();
        info!("Daemon stopped");
        Ok(())
    }
}
