//! Daemon error types

use chord_core::ConfigError;
use chord_decoder::DecoderError;
use chord_replaygain::ReplayGainError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DaemonError>;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("Failed to read configuration file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration syntax: {0}")]
    ConfigSyntax(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("ReplayGain configuration error")]
    ReplayGain(#[from] ReplayGainError),

    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),

    #[error("Daemon is still scanning")]
    Busy,
}
