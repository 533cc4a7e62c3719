//! Configuration blocks handed to plugin initializers
//!
//! The daemon owns the on-disk format. Libraries only see these plain
//! structures, where every value remembers the line it was read from so
//! parse failures can point at the offending line.

use crate::error::{ConfigError, InvalidValue, Result};

/// One configuration value plus its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParam {
    /// Raw value as written
    pub value: String,

    /// 1-based line number in the configuration file (0 when synthesized)
    pub line: usize,
}

impl ConfigParam {
    pub fn new(value: impl Into<String>, line: usize) -> Self {
        Self {
            value: value.into(),
            line,
        }
    }

    /// Interpret the value as a boolean
    pub fn parse_bool(&self) -> Result<bool> {
        parse_bool(&self.value).ok_or_else(|| {
            ConfigError::param(self.line, InvalidValue::NotBoolean(self.value.clone()))
        })
    }
}

/// A named group of parameters, e.g. one `[[decoder]]` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigBlock {
    /// Line where the block starts
    pub line: usize,

    /// Parameters in file order
    pub params: Vec<(String, ConfigParam)>,
}

impl ConfigBlock {
    /// Create an empty block starting at `line`
    pub fn new(line: usize) -> Self {
        Self {
            line,
            params: Vec::new(),
        }
    }

    /// Append a parameter, builder style
    pub fn with_param(mut self, name: impl Into<String>, param: ConfigParam) -> Self {
        self.params.push((name.into(), param));
        self
    }

    /// Look up a parameter; the last occurrence wins
    pub fn get(&self, name: &str) -> Option<&ConfigParam> {
        self.params
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, param)| param)
    }

    /// Raw string value of a parameter
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).map(|param| param.value.as_str())
    }

    /// Boolean value of a parameter, `default` when absent
    pub fn get_bool(&self, name: &str, default: bool) -> Result<bool> {
        match self.get(name) {
            Some(param) => param.parse_bool(),
            None => Ok(default),
        }
    }

    /// Value of a parameter that must be present
    pub fn require(&self, name: &str) -> Result<&ConfigParam> {
        self.get(name).ok_or_else(|| ConfigError::Missing {
            name: name.to_string(),
            line: self.line,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Some(true),
        "no" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}
