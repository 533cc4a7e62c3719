//! Chord Daemon Library
//!
//! Host side of the decoder plugins: configuration loading, plugin
//! registry startup/shutdown, and source scanning.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod daemon;
pub mod error;
pub mod logging;
pub mod scan;

// Re-export commonly used types for convenience
pub use config::{DaemonConfig, LogSettings};
pub use daemon::Daemon;
pub use error::{DaemonError, Result};
pub use scan::{discover_sources, scan_sources, ScanOutcome, ScanStats};
