//! Chord Core
//!
//! Format-agnostic building blocks shared by the decoder plugins and the
//! daemon that hosts them.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Tag kinds**: `TagType`, the closed set of dedicated descriptive fields
//! - **Tag Handler Protocol**: the `TagHandler` sink a scan emits facts into,
//!   plus stock handlers (`TagCollector`, `DurationProbe`, `FanOut`)
//! - **Configuration blocks**: `ConfigBlock` / `ConfigParam`, the opaque
//!   settings handed to plugin initializers
//! - **Error Handling**: `ConfigError` and the `Result` alias
//!
//! # Example
//!
//! ```rust
//! use chord_core::{TagCollector, TagHandler, TagType};
//! use std::time::Duration;
//!
//! let mut collector = TagCollector::new();
//! collector.on_tag(TagType::Title, "RFI Monde");
//! collector.on_duration(Duration::from_secs(17833));
//!
//! let descriptor = collector.into_descriptor();
//! assert_eq!(descriptor.tag(TagType::Title), Some("RFI Monde"));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod tag;

pub use config::{ConfigBlock, ConfigParam};
pub use error::{ConfigError, InvalidValue, Result};
pub use tag::{DurationProbe, Fact, FanOut, SourceDescriptor, TagCollector, TagHandler, TagType};
