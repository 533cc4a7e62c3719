/// Core error types for Chord
use thiserror::Error;

/// Result type alias using `ConfigError`
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A configuration value that could not be interpreted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidValue {
    /// Value is not a recognized boolean spelling
    #[error("Not a valid boolean (expected yes/no): {0:?}")]
    NotBoolean(String),

    /// Value is not a recognized member of an enumeration
    #[error("Unrecognized value: {0:?}")]
    Unrecognized(String),

    /// Value failed a domain-specific check
    #[error("{0}")]
    Other(String),
}

/// Configuration error carrying the offending line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A single parameter could not be parsed
    #[error("Failed to parse line {line}")]
    Param {
        line: usize,
        #[source]
        source: InvalidValue,
    },

    /// A required parameter is absent from its block
    #[error("Missing parameter {name:?} in block starting at line {line}")]
    Missing { name: String, line: usize },
}

impl ConfigError {
    /// Wrap a value error with the line it came from
    pub fn param(line: usize, source: InvalidValue) -> Self {
        Self::Param { line, source }
    }

    /// Line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::Param { line, .. } | Self::Missing { line, .. } => *line,
        }
    }
}
