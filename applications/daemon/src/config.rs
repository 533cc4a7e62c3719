//! Daemon configuration
//!
//! TOML file with three sections:
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [replay_gain]
//! mode = "track"
//! preamp = -3
//! limit = "yes"
//!
//! [[decoder]]
//! plugin = "meta_source"
//! enabled = "yes"
//! ```
//!
//! Plugin and ReplayGain parameters are kept as `ConfigBlock`s so each
//! value still knows its line number when a library rejects it.

use crate::error::{DaemonError, Result};
use chord_core::{ConfigBlock, ConfigParam};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use toml::Spanned;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "chord.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default)]
pub struct DaemonConfig {
    pub log: LogSettings,

    /// `[replay_gain]` parameters
    pub replay_gain: ConfigBlock,

    /// One block per `[[decoder]]` table
    pub decoders: Vec<ConfigBlock>,

    /// File the configuration came from, if any
    pub source: Option<PathBuf>,
}

type RawTable = BTreeMap<String, Spanned<toml::Value>>;

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    log: LogSettings,

    #[serde(default)]
    replay_gain: RawTable,

    #[serde(default)]
    decoder: Vec<RawTable>,
}

impl DaemonConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `chord.toml` in the working
    /// directory is used if present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| DaemonError::ConfigRead {
            path: path.clone(),
            source,
        })?;

        let mut config = Self::from_toml_str(&text)?;
        config.source = Some(path);
        Ok(config)
    }

    /// Parse configuration text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text)?;

        Ok(Self {
            log: raw.log,
            replay_gain: to_block(text, raw.replay_gain),
            decoders: raw
                .decoder
                .into_iter()
                .map(|table| to_block(text, table))
                .collect(),
            source: None,
        })
    }

    /// Configuration block of the `[[decoder]]` table naming `plugin`
    pub fn decoder_block(&self, plugin: &str) -> Option<&ConfigBlock> {
        self.decoders
            .iter()
            .find(|block| block.get_str("plugin") == Some(plugin))
    }
}

fn to_block(text: &str, table: RawTable) -> ConfigBlock {
    let mut params: Vec<(String, ConfigParam)> = table
        .into_iter()
        .map(|(name, spanned)| {
            let line = line_of(text, spanned.span().start);
            let value = match spanned.into_inner() {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            (name, ConfigParam::new(value, line))
        })
        .collect();
    params.sort_by_key(|(_, param)| param.line);

    // Tables have no span of their own; the header sits just above the first key
    let line = params
        .first()
        .map(|(_, param)| param.line.saturating_sub(1))
        .unwrap_or(0);

    ConfigBlock { line, params }
}

/// 1-based line of a byte offset
fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()
        .iter()
        .take(offset)
        .filter(|b| **b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"# chord daemon
[log]
level = "debug"

[replay_gain]
mode = "album"
preamp = -3.5
limit = false

[[decoder]]
plugin = "meta_source"
enabled = "no"
"#;

    #[test]
    fn values_keep_their_lines() {
        let config = DaemonConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.log.level, "debug");

        let mode = config.replay_gain.get("mode").unwrap();
        assert_eq!((mode.value.as_str(), mode.line), ("album", 6));

        let preamp = config.replay_gain.get("preamp").unwrap();
        assert_eq!((preamp.value.as_str(), preamp.line), ("-3.5", 7));

        assert_eq!(config.replay_gain.get_str("limit"), Some("false"));
    }

    #[test]
    fn decoder_blocks_are_found_by_plugin_name() {
        let config = DaemonConfig::from_toml_str(SAMPLE).unwrap();
        let block = config.decoder_block("meta_source").unwrap();
        assert_eq!(block.get("enabled").unwrap().line, 12);
        assert_eq!(block.line, 10);
        assert!(config.decoder_block("ffmpeg").is_none());
    }

    #[test]
    fn empty_text_gives_defaults() {
        let config = DaemonConfig::from_toml_str("").unwrap();
        assert_eq!(config.log, LogSettings::default());
        assert!(config.replay_gain.is_empty());
        assert!(config.decoders.is_empty());
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(matches!(
            DaemonConfig::from_toml_str("[log\nlevel = 1"),
            Err(DaemonError::ConfigSyntax(_))
        ));
    }

    #[test]
    fn line_of_counts_newlines() {
        assert_eq!(line_of("a\nb\nc", 0), 1);
        assert_eq!(line_of("a\nb\nc", 2), 2);
        assert_eq!(line_of("a\nb\nc", 4), 3);
    }
}
