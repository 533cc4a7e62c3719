/// Decoder-specific errors
use chord_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `DecoderError`
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Decoder error types
#[derive(Error, Debug)]
pub enum DecoderError {
    /// The source could not be opened or read
    #[error("Source unreadable: {}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A plugin with the same name is already registered
    #[error("Plugin '{0}' is already registered")]
    DuplicatePlugin(String),

    /// A plugin declared no suffixes or no MIME types
    #[error("Plugin '{0}' declares no {1}")]
    EmptyRecognitionList(String, &'static str),

    /// Registration attempted after initialization
    #[error("Cannot register plugin '{0}' after initialization")]
    RegistrationClosed(String),

    /// Scan requested before the registry was initialized
    #[error("Decoder plugins have not been initialized")]
    NotInitialized,

    /// Operation requested after the registry was finished
    #[error("Decoder plugins have already been finished")]
    AlreadyFinished,

    /// No active plugin handles the source
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A plugin initializer failed
    #[error("Failed to initialize decoder plugin '{plugin}'")]
    PluginInit {
        plugin: String,
        #[source]
        source: Box<DecoderError>,
    },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
