//! Per-song ReplayGain values
//!
//! # Scale Calculation
//!
//! - Defined gain: `10^(gain / 20) * preamp`, capped at `MAX_SCALE`
//! - With `limit`: never more than `1 / peak`, so the peak stays at full scale
//! - Undefined gain: `missing_preamp`

use crate::{ReplayGainConfig, ReplayGainMode, MAX_SCALE};

/// Gains below this are treated as "not present"
const UNDEFINED_THRESHOLD: f32 = -100.0;

/// One gain/peak pair (track or album)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayGainTuple {
    /// Gain in dB
    pub gain: f32,
    /// Peak sample as a linear fraction of full scale
    pub peak: f32,
}

impl Default for ReplayGainTuple {
    fn default() -> Self {
        Self::undefined()
    }
}

impl ReplayGainTuple {
    pub fn new(gain: f32, peak: f32) -> Self {
        Self { gain, peak }
    }

    /// A tuple carrying no information
    pub fn undefined() -> Self {
        Self {
            gain: -200.0,
            peak: 0.0,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.gain > UNDEFINED_THRESHOLD
    }

    /// Linear scale to apply to samples under `config`
    pub fn calculate_scale(&self, config: &ReplayGainConfig) -> f32 {
        if !self.is_defined() {
            return config.missing_preamp;
        }

        let mut scale = 10f32.powf(self.gain / 20.0) * config.preamp;
        if scale > MAX_SCALE {
            scale = MAX_SCALE;
        }

        if config.limit && self.peak > 0.0 && scale * self.peak > 1.0 {
            scale = 1.0 / self.peak;
        }

        scale
    }
}

/// Track and album gain of one song
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReplayGainInfo {
    pub track: ReplayGainTuple,
    pub album: ReplayGainTuple,
}

impl ReplayGainInfo {
    pub fn is_defined(&self) -> bool {
        self.track.is_defined() || self.album.is_defined()
    }

    /// Tuple to use for `mode`, falling back to the other one when missing
    ///
    /// `Auto` is resolved by the player before it gets here; without that
    /// context it behaves like `Track`.
    pub fn tuple_for(&self, mode: ReplayGainMode) -> &ReplayGainTuple {
        let (preferred, fallback) = match mode {
            ReplayGainMode::Album => (&self.album, &self.track),
            _ => (&self.track, &self.album),
        };

        if preferred.is_defined() {
            preferred
        } else {
            fallback
        }
    }

    /// Linear scale for this song under `config`; unity when disabled
    pub fn scale(&self, config: &ReplayGainConfig) -> f32 {
        if config.mode == ReplayGainMode::Off {
            return 1.0;
        }
        self.tuple_for(config.mode).calculate_scale(config)
    }
}
