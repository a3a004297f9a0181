//! Manifest reading and writing.
//!
//! The manifest (`memories.json`) is the only contract between the offline
//! pipeline and the slideshow: a pretty-printed JSON array of
//! [`MemoryEntry`] values sorted ascending by `date`. Every pipeline run
//! overwrites it completely.

use crate::config::MediaLayout;
use crate::types::MemoryEntry;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `entries` as pretty JSON and overwrite `path`.
///
/// The caller is responsible for ordering; both pipelines sort before
/// writing.
pub fn write_manifest(path: &Path, entries: &[MemoryEntry]) -> Result<(), ManifestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), entries = entries.len(), "manifest written");
    Ok(())
}

/// Parse a manifest from its JSON text.
pub fn parse_manifest(json: &str) -> Result<Vec<MemoryEntry>, ManifestError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a manifest file.
pub fn read_manifest(path: &Path) -> Result<Vec<MemoryEntry>, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}

/// A manifest invariant violation found by [`check_manifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestProblem {
    /// Entry at `index` is dated before the one preceding it.
    OutOfOrder { index: usize, filename: String },
    /// The same source filename appears more than once.
    DuplicateFilename(String),
    /// The entry's path is not under the media base URL.
    PathOutsideMedia { filename: String, path: String },
}

impl fmt::Display for ManifestProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestProblem::OutOfOrder { index, filename } => {
                write!(f, "entry {} ({}) is dated before its predecessor", index, filename)
            }
            ManifestProblem::DuplicateFilename(name) => {
                write!(f, "duplicate filename {}", name)
            }
            ManifestProblem::PathOutsideMedia { filename, path } => {
                write!(f, "{} points outside the media folder: {}", filename, path)
            }
        }
    }
}

/// Check the manifest invariants: non-decreasing dates, unique filenames, and
/// every path under the media base URL.
pub fn check_manifest(entries: &[MemoryEntry], layout: &MediaLayout) -> Vec<ManifestProblem> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 && entry.date < entries[index - 1].date {
            problems.push(ManifestProblem::OutOfOrder {
                index,
                filename: entry.filename.clone(),
            });
        }
        if !seen.insert(entry.filename.as_str()) {
            problems.push(ManifestProblem::DuplicateFilename(entry.filename.clone()));
        }
        if !layout.is_media_url(&entry.path) {
            problems.push(ManifestProblem::PathOutsideMedia {
                filename: entry.filename.clone(),
                path: entry.path.clone(),
            });
        }
    }

    problems
}
