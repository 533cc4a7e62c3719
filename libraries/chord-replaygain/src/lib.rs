//! ReplayGain settings for Chord
//!
//! This crate provides:
//! - `ReplayGainConfig`, the settings struct read once at startup and passed
//!   explicitly to whatever output code applies gain
//! - `ReplayGainMode` parsing
//! - `ReplayGainTuple` / `ReplayGainInfo`, per-song gain values and the
//!   linear scale they translate to under a given configuration
//!
//! # Example
//!
//! ```rust
//! use chord_core::{ConfigBlock, ConfigParam};
//! use chord_replaygain::{ReplayGainConfig, ReplayGainMode, ReplayGainTuple};
//!
//! let block = ConfigBlock::new(1)
//!     .with_param("mode", ConfigParam::new("track", 2))
//!     .with_param("preamp", ConfigParam::new("0", 3));
//! let config = ReplayGainConfig::from_block(&block)?;
//! assert_eq!(config.mode, ReplayGainMode::Track);
//!
//! let scale = ReplayGainTuple::new(-6.0, 0.5).calculate_scale(&config);
//! assert!(scale < 1.0);
//! # Ok::<(), chord_replaygain::ReplayGainError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod info;

pub use config::{parse_preamp, ReplayGainConfig, ReplayGainMode};
pub use error::{PreampError, ReplayGainError, Result};
pub use info::{ReplayGainInfo, ReplayGainTuple};

/// Largest preamp accepted in configuration, in dB
pub const MAX_PREAMP_DB: f32 = 15.0;

/// Smallest preamp accepted in configuration, in dB
pub const MIN_PREAMP_DB: f32 = -15.0;

/// Upper bound on the linear scale applied to a song
pub const MAX_SCALE: f32 = 15.0;
