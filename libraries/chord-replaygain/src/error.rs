//! Error types for ReplayGain configuration

use chord_core::ConfigError;
use thiserror::Error;

/// Result type for ReplayGain operations
pub type Result<T> = std::result::Result<T, ReplayGainError>;

/// Why a preamp value was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreampError {
    /// Value is not entirely a number
    #[error("Not a numeric value")]
    NotNumeric,

    /// Value is outside the accepted dB range
    #[error("Number must be between -15 and 15")]
    OutOfRange,
}

/// Errors raised while reading ReplayGain settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReplayGainError {
    /// A parameter failed to parse; `line` points at it
    #[error("Failed to parse line {line}")]
    Param {
        line: usize,
        #[source]
        source: PreampError,
    },

    /// Unrecognized mode or boolean
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReplayGainError {
    /// Line of the offending configuration parameter
    pub fn line(&self) -> usize {
        match self {
            Self::Param { line, .. } => *line,
            Self::Config(e) => e.line(),
        }
    }
}
