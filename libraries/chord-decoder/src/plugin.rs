/// Decoder plugin descriptor
use crate::error::Result;
use chord_core::{ConfigBlock, SourceDescriptor, TagHandler};
use std::io::BufRead;
use std::path::Path;

/// Called once at startup; returns whether the plugin is active
pub type InitFn = fn(&ConfigBlock) -> Result<bool>;

/// Called once at shutdown for active plugins
pub type FinishFn = fn();

/// Scan a file on disk; `false` when the source is unreadable
pub type ScanFileFn = fn(&Path, &mut dyn TagHandler) -> bool;

/// Scan an already opened stream
pub type ScanStreamFn = fn(&mut dyn BufRead, &mut dyn TagHandler) -> bool;

/// List the sub-entries of a container file
pub type ContainerScanFn = fn(&Path) -> Result<Vec<SourceDescriptor>>;

/// Immutable registration record for one format
///
/// Built once as a `static` and handed to the registry by reference. All
/// behavior lives in the function slots; the descriptor itself holds no
/// state.
#[derive(Debug, Clone, Copy)]
pub struct DecoderPlugin {
    /// Unique plugin name, also the key of its configuration block
    pub name: &'static str,

    /// Recognized filename suffixes, matched case-insensitively
    pub suffixes: &'static [&'static str],

    /// Recognized MIME types, matched exactly
    pub mime_types: &'static [&'static str],

    pub init: Option<InitFn>,
    pub finish: Option<FinishFn>,
    pub scan_file: Option<ScanFileFn>,
    pub scan_stream: Option<ScanStreamFn>,
    pub container_scan: Option<ContainerScanFn>,
}

impl DecoderPlugin {
    /// Whether `suffix` (without the dot) belongs to this plugin
    pub fn supports_suffix(&self, suffix: &str) -> bool {
        self.suffixes.iter().any(|s| s.eq_ignore_ascii_case(suffix))
    }

    /// Whether `mime_type` belongs to this plugin
    pub fn supports_mime_type(&self, mime_type: &str) -> bool {
        self.mime_types.iter().any(|m| *m == mime_type)
    }

    /// Whether the file extension of `path` belongs to this plugin
    pub fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.supports_suffix(e))
            .unwrap_or(false)
    }

    /// Run the initializer; plugins without one are always active
    pub fn init(&self, block: &ConfigBlock) -> Result<bool> {
        match self.init {
            Some(init) => init(block),
            None => Ok(true),
        }
    }

    /// Run the finalizer, if any
    pub fn finish(&self) {
        if let Some(finish) = self.finish {
            finish();
        }
    }

    pub fn supports_container(&self) -> bool {
        self.container_scan.is_some()
    }
}

impl std::fmt::Display for DecoderPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [suffixes: {}] [mime: {}]",
            self.name,
            self.suffixes.join(", "),
            self.mime_types.join(", ")
        )
    }
}
