//! Source discovery and parallel scanning

use chord_core::{SourceDescriptor, TagCollector};
use chord_decoder::PluginRegistry;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of scanning one source
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    pub path: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<SourceDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        self.descriptor.is_some()
    }

    fn failed(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            descriptor: None,
            error: Some(error.into()),
        }
    }
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Number of sources handed to the scanner
    pub sources: usize,

    /// Number of sources scanned successfully
    pub scanned: usize,

    /// Number of sources that failed
    pub failed: usize,
}

impl ScanStats {
    pub fn from_outcomes(outcomes: &[ScanOutcome]) -> Self {
        let scanned = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            sources: outcomes.len(),
            scanned,
            failed: outcomes.len() - scanned,
        }
    }
}

/// Expand roots into the list of sources to scan
///
/// Files named explicitly are always kept, so unsupported or missing ones
/// show up as failed scans. Directories are walked recursively and only
/// files some active plugin recognizes are kept.
pub fn discover_sources(registry: &PluginRegistry, roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut sources = Vec::new();

    for root in roots {
        if !root.is_dir() {
            sources.push(root.clone());
            continue;
        }

        let before = sources.len();
        for entry in walkdir::WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "Skipping unreadable directory entry");
                    None
                }
            })
        {
            let path = entry.path();
            if entry.file_type().is_file() && registry.find_for_path(path).is_some() {
                sources.push(path.to_path_buf());
            }
        }
        debug!(root = %root.display(), found = sources.len() - before, "Walked directory");
    }

    sources
}

/// Scan every source on the blocking pool
///
/// Outcomes come back in input order. A failure affects only its own
/// source.
pub async fn scan_sources(
    registry: Arc<PluginRegistry>,
    sources: Vec<PathBuf>,
) -> Vec<ScanOutcome> {
    let tasks: Vec<_> = sources
        .into_iter()
        .map(|path| {
            let registry = Arc::clone(&registry);
            let task_path = path.clone();
            let handle = tokio::task::spawn_blocking(move || scan_one(&registry, task_path));
            (path, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(tasks.len());
    for (path, handle) in tasks {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Scan task failed");
                outcomes.push(ScanOutcome::failed(path, "scan task failed"));
            }
        }
    }

    let stats = ScanStats::from_outcomes(&outcomes);
    info!(
        sources = stats.sources,
        scanned = stats.scanned,
        failed = stats.failed,
        "Scan complete"
    );
    outcomes
}

/// Scan one source into a descriptor
pub fn scan_one(registry: &PluginRegistry, path: PathBuf) -> ScanOutcome {
    let mut collector = TagCollector::new();

    match registry.scan_file(&path, &mut collector) {
        Ok(true) => ScanOutcome {
            path,
            descriptor: Some(collector.into_descriptor()),
            error: None,
        },
        Ok(false) => ScanOutcome::failed(path, "source unreadable"),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot scan source");
            ScanOutcome::failed(path, e.to_string())
        }
    }
}

