//! ReplayGain settings
//!
//! Read once during startup, before any playback, and never mutated
//! afterwards. Output code receives the struct by reference.

use crate::error::{PreampError, ReplayGainError, Result};
use crate::{MAX_PREAMP_DB, MIN_PREAMP_DB};
use chord_core::{ConfigBlock, ConfigError, ConfigParam, InvalidValue};
use serde::Serialize;

const DEFAULT_LIMIT: bool = true;

/// Which gain values to apply during playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayGainMode {
    /// No ReplayGain applied
    #[default]
    Off,
    /// Per-track gain
    Track,
    /// Album-relative gain
    Album,
    /// Album gain when playing an album in order, track gain otherwise
    Auto,
}

impl ReplayGainMode {
    /// Parse from a configuration value
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" => Some(Self::Off),
            "track" => Some(Self::Track),
            "album" => Some(Self::Album),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Track => "track",
            Self::Album => "album",
            Self::Auto => "auto",
        }
    }
}

/// Process-wide ReplayGain settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplayGainConfig {
    /// Gain selection mode
    pub mode: ReplayGainMode,

    /// Linear factor applied on top of the song's gain
    pub preamp: f32,

    /// Linear factor for songs without ReplayGain values
    pub missing_preamp: f32,

    /// Never let the applied gain push the song's peak above full scale
    pub limit: bool,
}

impl Default for ReplayGainConfig {
    fn default() -> Self {
        Self {
            mode: ReplayGainMode::Off,
            preamp: 1.0,
            missing_preamp: 1.0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ReplayGainConfig {
    /// Build the settings from a configuration block
    ///
    /// Recognized parameters: `mode`, `preamp`, `missing_preamp` (both in
    /// dB) and `limit`. Absent parameters keep their defaults. The first
    /// bad value aborts with the line it was found on.
    pub fn from_block(block: &ConfigBlock) -> Result<Self> {
        let mut config = Self::default();

        if let Some(param) = block.get("mode") {
            config.mode = ReplayGainMode::from_str(&param.value).ok_or_else(|| {
                ConfigError::param(param.line, InvalidValue::Unrecognized(param.value.clone()))
            })?;
        }

        if let Some(param) = block.get("preamp") {
            config.preamp = preamp_param(param)?;
        }

        if let Some(param) = block.get("missing_preamp") {
            config.missing_preamp = preamp_param(param)?;
        }

        config.limit = block.get_bool("limit", DEFAULT_LIMIT)?;

        tracing::debug!(
            mode = config.mode.as_str(),
            preamp = config.preamp,
            missing_preamp = config.missing_preamp,
            limit = config.limit,
            "ReplayGain configured"
        );
        Ok(config)
    }
}

/// Parse a preamp in dB into a linear factor
///
/// The whole value must be numeric and lie within -15..=15 dB.
pub fn parse_preamp(s: &str) -> std::result::Result<f32, PreampError> {
    let db: f64 = s
        .trim_start()
        .parse()
        .map_err(|_| PreampError::NotNumeric)?;

    if !(f64::from(MIN_PREAMP_DB)..=f64::from(MAX_PREAMP_DB)).contains(&db) {
        return Err(PreampError::OutOfRange);
    }

    Ok(10f64.powf(db / 20.0) as f32)
}

fn preamp_param(param: &ConfigParam) -> Result<f32> {
    parse_preamp(&param.value).map_err(|source| ReplayGainError::Param {
        line: param.line,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(params: &[(&str, &str)]) -> ConfigBlock {
        params
            .iter()
            .enumerate()
            .fold(ConfigBlock::new(1), |block, (i, (name, value))| {
                block.with_param(*name, ConfigParam::new(*value, i + 2))
            })
    }

    #[test]
    fn empty_block_gives_defaults() {
        let config = ReplayGainConfig::from_block(&ConfigBlock::default()).unwrap();
        assert_eq!(config, ReplayGainConfig::default());
        assert!(config.limit);
    }

    #[test]
    fn zero_db_is_unity() {
        assert_eq!(parse_preamp("0").unwrap(), 1.0);
    }

    #[test]
    fn preamp_converts_db_to_linear() {
        let gain = parse_preamp("-6").unwrap();
        assert!((gain - 0.501_187).abs() < 1e-5);
        let gain = parse_preamp("15").unwrap();
        assert!((gain - 5.623_413).abs() < 1e-4);
    }

    #[test]
    fn preamp_rejects_garbage_and_range() {
        assert_eq!(parse_preamp("loud"), Err(PreampError::NotNumeric));
        assert_eq!(parse_preamp("3dB"), Err(PreampError::NotNumeric));
        assert_eq!(parse_preamp(""), Err(PreampError::NotNumeric));
        assert_eq!(parse_preamp("15.5"), Err(PreampError::OutOfRange));
        assert_eq!(parse_preamp("-16"), Err(PreampError::OutOfRange));
        assert_eq!(parse_preamp("NaN"), Err(PreampError::OutOfRange));
    }

    #[test]
    fn out_of_range_preamp_reports_its_line() {
        let config = ReplayGainConfig::from_block(&block(&[
            ("mode", "Album"),
            ("preamp", "0"),
            ("missing_preamp", "-20.0"),
        ]));
        let err = config.unwrap_err();
        assert_eq!(err.line(), 4);
        assert_eq!(err.to_string(), "Failed to parse line 4");
        assert_eq!(
            std::error::Error::source(&err).map(|s| s.to_string()),
            Some("Number must be between -15 and 15".to_string())
        );
    }

    #[test]
    fn bad_mode_reports_line() {
        let err = ReplayGainConfig::from_block(&block(&[("mode", "loud")])).unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn limit_parses_boolean() {
        let config =
            ReplayGainConfig::from_block(&block(&[("mode", "auto"), ("limit", "no")])).unwrap();
        assert_eq!(config.mode, ReplayGainMode::Auto);
        assert!(!config.limit);
    }
}
