//! Decoder plugins for Chord
//!
//! This crate provides:
//! - `DecoderPlugin`, the immutable registration record binding a format's
//!   suffixes and MIME types to its init/finish/scan functions
//! - `PluginRegistry`, the host-side collection that matches sources to
//!   plugins and drives the init/finish lifecycle
//! - `LineReader`, a lossy line-at-a-time text source
//! - The `meta_source` plugin, which reads small `key: value` files that
//!   point at a playable stream and describe it
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ LineReader   │ ──► │ parse_line   │ ──► │  TagHandler   │
//! └──────────────┘     └──────────────┘     └───────────────┘
//!        ▲
//!        │ scan_file (selected by suffix / MIME type)
//! ┌──────────────┐
//! │ Registry     │
//! └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use chord_core::{ConfigBlock, TagCollector};
//! use chord_decoder::{PluginRegistry, META_SOURCE_PLUGIN};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = PluginRegistry::new();
//! registry.register(&META_SOURCE_PLUGIN)?;
//! registry.init_all(|_name| None::<&ConfigBlock>)?;
//!
//! let mut collector = TagCollector::new();
//! if registry.scan_file(Path::new("/music/radio.mpdmeta"), &mut collector)? {
//!     println!("{:?}", collector.into_descriptor());
//! }
//! registry.finish_all();
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod line_reader;
mod plugin;
pub mod plugins;
mod registry;

pub use error::{DecoderError, Result};
pub use line_reader::LineReader;
pub use plugin::{ContainerScanFn, DecoderPlugin, FinishFn, InitFn, ScanFileFn, ScanStreamFn};
pub use plugins::meta_source::{Diagnostic, META_SOURCE_PLUGIN};
pub use registry::PluginRegistry;
