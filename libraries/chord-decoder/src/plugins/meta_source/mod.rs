//! `meta_source` plugin
//!
//! Recognizes `.mpdmeta` files: small text files describing a stream that
//! lives elsewhere (typically an internet radio URL) with its title, genre
//! and duration.
//!
//! ```text
//! # comment
//! target_uri: http://live02.rfi.fr/rfimonde-64.mp3
//! title: RFI Monde
//! genre: News
//! duration: 17833
//! category: talk
//! country: FR
//! ```
//!
//! Unknown keys are logged and ignored so newer files still scan on older
//! daemons.

pub mod grammar;

use self::grammar::{parse_duration, parse_line, Field};
use crate::error::{DecoderError, Result};
use crate::line_reader::LineReader;
use crate::plugin::DecoderPlugin;
use chord_core::{ConfigBlock, TagHandler, TagType};
use std::io::BufRead;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Registration record for the meta_source plugin
pub static META_SOURCE_PLUGIN: DecoderPlugin = DecoderPlugin {
    name: "meta_source",
    suffixes: &["mpdmeta"],
    mime_types: &["application/mpd-meta-source"],
    init: Some(init),
    finish: Some(finish),
    scan_file: Some(scan_file),
    scan_stream: Some(scan_stream),
    container_scan: None,
};

/// Non-fatal problem found while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Line whose key is not recognized (or that has no colon)
    UnrecognizedLine { line_number: usize, line: String },

    /// `duration` value without any leading digits; reported as zero
    InvalidDuration { line_number: usize, value: String },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedLine { line_number, line } => {
                write!(f, "Unrecognized line {line_number} in meta source file: {line}")
            }
            Self::InvalidDuration { line_number, value } => {
                write!(f, "Invalid duration on line {line_number}: {value:?}")
            }
        }
    }
}

fn init(block: &ConfigBlock) -> Result<bool> {
    debug!(line = block.line, "meta_source init");
    Ok(true)
}

fn finish() {
    debug!("meta_source finish");
}

/// Scan one `.mpdmeta` file
///
/// Returns `false` only when the file cannot be opened; in that case the
/// handler receives nothing.
pub fn scan_file(path: &Path, handler: &mut dyn TagHandler) -> bool {
    match try_scan_file(path, handler) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Meta source unreadable");
            false
        }
    }
}

/// Scan one `.mpdmeta` file, keeping the open error
pub fn try_scan_file(path: &Path, handler: &mut dyn TagHandler) -> Result<()> {
    debug!(path = %path.display(), "meta_source scan_file");

    let reader = LineReader::open(path).map_err(|source| DecoderError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    scan_lines(reader, handler, &mut log_diagnostic);
    Ok(())
}

/// Scan meta source text from an already opened stream
pub fn scan_stream(reader: &mut dyn BufRead, handler: &mut dyn TagHandler) -> bool {
    debug!("meta_source scan_stream");
    scan_lines(LineReader::new(reader), handler, &mut log_diagnostic);
    true
}

/// Scan meta source text, reporting diagnostics to `on_diagnostic`
///
/// Same as [`scan_stream`] but lets the caller observe non-fatal problems
/// instead of only logging them.
pub fn scan_with_diagnostics<R, F>(reader: R, handler: &mut dyn TagHandler, mut on_diagnostic: F)
where
    R: BufRead,
    F: FnMut(Diagnostic),
{
    scan_lines(LineReader::new(reader), handler, &mut on_diagnostic);
}

fn log_diagnostic(diagnostic: Diagnostic) {
    match diagnostic {
        Diagnostic::UnrecognizedLine { line_number, line } => {
            warn!(line_number, line = %line, "Unrecognized line in meta source file");
        }
        Diagnostic::InvalidDuration { line_number, value } => {
            warn!(line_number, value = %value, "Invalid duration in meta source file");
        }
    }
}

fn scan_lines<I>(lines: I, handler: &mut dyn TagHandler, on_diagnostic: &mut dyn FnMut(Diagnostic))
where
    I: Iterator<Item = String>,
{
    for (index, line) in lines.enumerate() {
        let line_number = index + 1;
        let Some((key, value)) = parse_line(&line) else {
            continue;
        };

        let Some(field) = Field::from_key(key) else {
            on_diagnostic(Diagnostic::UnrecognizedLine {
                line_number,
                line: line.clone(),
            });
            continue;
        };

        match field {
            Field::TargetUri => handler.on_target_uri(value),
            Field::Genre => handler.on_tag(TagType::Genre, value),
            Field::Title => handler.on_tag(TagType::Title, value),
            Field::Duration => {
                let secs = parse_duration(value).unwrap_or_else(|| {
                    on_diagnostic(Diagnostic::InvalidDuration {
                        line_number,
                        value: value.to_string(),
                    });
                    0
                });
                handler.on_duration(Duration::from_secs(secs));
            }
            Field::Category | Field::Country => handler.on_pair(field.key(), value),
        }
    }
}
