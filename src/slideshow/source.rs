//! Where the slideshow gets its manifest from.
//!
//! The manifest is fetched exactly once per load, by root-relative URL. The
//! [`ManifestSource`] trait is the seam: [`WebRootSource`] resolves the URL
//! against a directory the way a static file server would, tests use an
//! in-memory source.

use crate::config::MediaLayout;
use crate::manifest::{ManifestError, parse_manifest};
use crate::types::MemoryEntry;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Manifest not found at {url}: {reason}")]
    ManifestMissing { url: String, reason: String },
    #[error("Malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Something that can answer a GET for the manifest.
pub trait ManifestSource {
    /// Root-relative URL the manifest is requested from.
    fn manifest_url(&self) -> &str;

    /// Body of a successful response, or [`LoadError::ManifestMissing`].
    fn fetch(&self, url: &str) -> Result<String, LoadError>;
}

/// Fetch the manifest once and parse it.
pub fn fetch_entries(source: &impl ManifestSource) -> Result<Vec<MemoryEntry>, LoadError> {
    let url = source.manifest_url();
    let body = source.fetch(url)?;
    parse_manifest(&body).map_err(|e| match e {
        ManifestError::Json(e) => LoadError::Malformed(e),
        ManifestError::Io(e) => LoadError::ManifestMissing {
            url: url.to_string(),
            reason: e.to_string(),
        },
    })
}

/// Serves root-relative URLs from a web root directory.
#[derive(Debug, Clone)]
pub struct WebRootSource {
    web_root: PathBuf,
    manifest_url: String,
}

impl WebRootSource {
    pub fn new(web_root: impl Into<PathBuf>, manifest_url: impl Into<String>) -> Self {
        Self {
            web_root: web_root.into(),
            manifest_url: manifest_url.into(),
        }
    }

    pub fn from_layout(layout: &MediaLayout) -> Self {
        Self::new(&layout.web_root, &layout.manifest_url)
    }

    /// Map a root-relative URL to a file under the web root. URLs that climb
    /// out of the root resolve to nothing.
    pub fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return None;
        }
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return None;
        }
        Some(self.web_root.join(relative))
    }
}

impl ManifestSource for WebRootSource {
    fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        let missing = |reason: String| LoadError::ManifestMissing {
            url: url.to_string(),
            reason,
        };
        let path = self
            .resolve(url)
            .ok_or_else(|| missing("not under the web root".to_string()))?;
        std::fs::read_to_string(&path).map_err(|e| missing(e.to_string()))
    }
}
