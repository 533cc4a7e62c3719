//! Plugin Registry
//!
//! Host-side collection of decoder plugins. Plugins are registered at
//! startup, initialized once, shared read-only by concurrent scans, and
//! finished once at shutdown.

use crate::error::{DecoderError, Result};
use crate::plugin::DecoderPlugin;
use crate::plugins::BUILTIN_PLUGINS;
use chord_core::{ConfigBlock, TagHandler};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Registered,
    Initialized,
    Finished,
}

#[derive(Debug)]
struct Entry {
    plugin: &'static DecoderPlugin,
    active: bool,
}

/// Registry of decoder plugins
#[derive(Debug)]
pub struct PluginRegistry {
    entries: Vec<Entry>,
    lifecycle: Lifecycle,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lifecycle: Lifecycle::Registered,
        }
    }

    /// Create a registry holding every built-in plugin
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        for plugin in BUILTIN_PLUGINS.iter().copied() {
            registry.register(plugin)?;
        }
        Ok(registry)
    }

    /// Register a plugin
    ///
    /// Names must be unique and both recognition lists non-empty.
    /// Registration closes once [`init_all`](Self::init_all) has run.
    pub fn register(&mut self, plugin: &'static DecoderPlugin) -> Result<()> {
        if self.lifecycle != Lifecycle::Registered {
            return Err(DecoderError::RegistrationClosed(plugin.name.to_string()));
        }

        if self.entries.iter().any(|e| e.plugin.name == plugin.name) {
            return Err(DecoderError::DuplicatePlugin(plugin.name.to_string()));
        }

        if plugin.suffixes.is_empty() {
            return Err(DecoderError::EmptyRecognitionList(
                plugin.name.to_string(),
                "suffixes",
            ));
        }

        if plugin.mime_types.is_empty() {
            return Err(DecoderError::EmptyRecognitionList(
                plugin.name.to_string(),
                "MIME types",
            ));
        }

        debug!(plugin = plugin.name, "Registered decoder plugin");
        self.entries.push(Entry {
            plugin,
            active: false,
        });
        Ok(())
    }

    /// Run every plugin initializer exactly once
    ///
    /// `config_for` returns the configuration block for a plugin name, if
    /// the host has one. A block with `enabled = no` leaves the plugin
    /// inactive without calling its initializer. The first initializer
    /// error aborts startup: plugins already initialized are finished and
    /// the registry cannot be initialized again.
    pub fn init_all<'a, F>(&mut self, mut config_for: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<&'a ConfigBlock>,
    {
        match self.lifecycle {
            Lifecycle::Registered => {}
            Lifecycle::Initialized => {
                debug!("Decoder plugins already initialized");
                return Ok(());
            }
            Lifecycle::Finished => return Err(DecoderError::AlreadyFinished),
        }

        let empty = ConfigBlock::default();
        let mut failure = None;
        for entry in &mut self.entries {
            let block = config_for(entry.plugin.name).unwrap_or(&empty);
            match Self::init_one(entry.plugin, block) {
                Ok(active) => entry.active = active,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = failure {
            self.abort_init();
            return Err(e);
        }

        self.lifecycle = Lifecycle::Initialized;
        Ok(())
    }

    fn init_one(plugin: &DecoderPlugin, block: &ConfigBlock) -> Result<bool> {
        if !block.get_bool("enabled", true)? {
            debug!(plugin = plugin.name, "Decoder plugin disabled by configuration");
            return Ok(false);
        }

        let active = plugin.init(block).map_err(|e| DecoderError::PluginInit {
            plugin: plugin.name.to_string(),
            source: Box::new(e),
        })?;

        if active {
            info!(plugin = plugin.name, "Decoder plugin enabled");
        } else {
            warn!(plugin = plugin.name, "Decoder plugin declined to initialize");
        }
        Ok(active)
    }

    /// Startup failed: finish whatever was already initialized
    ///
    /// The registry ends up finished, so no initializer can run twice.
    fn abort_init(&mut self) {
        for entry in self.entries.iter_mut().rev() {
            if entry.active {
                entry.plugin.finish();
                entry.active = false;
            }
        }
        self.lifecycle = Lifecycle::Finished;
    }

    /// Run the finalizer of every active plugin exactly once
    ///
    /// Plugins are finished in reverse registration order.
    pub fn finish_all(&mut self) {
        if self.lifecycle != Lifecycle::Initialized {
            return;
        }

        for entry in self.entries.iter_mut().rev() {
            if entry.active {
                entry.plugin.finish();
                entry.active = false;
            }
        }
        self.lifecycle = Lifecycle::Finished;
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    /// All registered plugins in registration order
    pub fn plugins(&self) -> impl Iterator<Item = &'static DecoderPlugin> + '_ {
        self.entries.iter().map(|e| e.plugin)
    }

    /// Plugins whose initializer accepted them
    pub fn active_plugins(&self) -> impl Iterator<Item = &'static DecoderPlugin> + '_ {
        self.entries.iter().filter(|e| e.active).map(|e| e.plugin)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.active && e.plugin.name == name)
    }

    /// First active plugin recognizing `suffix`
    pub fn find_by_suffix(&self, suffix: &str) -> Option<&'static DecoderPlugin> {
        self.active_plugins().find(|p| p.supports_suffix(suffix))
    }

    /// First active plugin recognizing `mime_type`
    pub fn find_by_mime_type(&self, mime_type: &str) -> Option<&'static DecoderPlugin> {
        self.active_plugins().find(|p| p.supports_mime_type(mime_type))
    }

    /// First active plugin recognizing the extension of `path`
    pub fn find_for_path(&self, path: &Path) -> Option<&'static DecoderPlugin> {
        self.active_plugins().find(|p| p.supports_path(path))
    }

    /// Scan a file with the plugin selected by its suffix
    ///
    /// `Ok(false)` means the plugin could not read the source. Errors are
    /// reserved for lifecycle misuse and unsupported formats.
    pub fn scan_file(&self, path: &Path, handler: &mut dyn TagHandler) -> Result<bool> {
        self.ensure_scannable()?;

        let plugin = self
            .find_for_path(path)
            .ok_or_else(|| DecoderError::UnsupportedFormat(path.display().to_string()))?;

        if let Some(scan_file) = plugin.scan_file {
            return Ok(scan_file(path, handler));
        }

        if let Some(scan_stream) = plugin.scan_stream {
            let mut reader = match open_readable(path) {
                Ok(reader) => reader,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Source unreadable");
                    return Ok(false);
                }
            };
            return Ok(scan_stream(&mut reader, handler));
        }

        Err(DecoderError::UnsupportedFormat(path.display().to_string()))
    }

    /// Scan an open stream with the plugin selected by MIME type
    pub fn scan_stream(
        &self,
        mime_type: &str,
        reader: &mut dyn BufRead,
        handler: &mut dyn TagHandler,
    ) -> Result<bool> {
        self.ensure_scannable()?;

        let scan_stream = self
            .find_by_mime_type(mime_type)
            .and_then(|p| p.scan_stream)
            .ok_or_else(|| DecoderError::UnsupportedFormat(mime_type.to_string()))?;

        Ok(scan_stream(reader, handler))
    }

    fn ensure_scannable(&self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Registered => Err(DecoderError::NotInitialized),
            Lifecycle::Initialized => Ok(()),
            Lifecycle::Finished => Err(DecoderError::AlreadyFinished),
        }
    }
}

/// Open a file and make sure its first read succeeds
fn open_readable(path: &Path) -> std::io::Result<BufReader<File>> {
    let mut reader = BufReader::new(File::open(path)?);
    reader.fill_buf()?;
    Ok(reader)
}
