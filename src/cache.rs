//! Transcode cache for repeated optimizer runs.
//!
//! AVIF encoding is by far the slowest part of the optimizer, and a media
//! folder is usually re-optimized after adding a handful of files. This module
//! decides when an existing transcoded file can be reused instead of encoding
//! the source again.
//!
//! # Validity rule
//!
//! An output is **fresh** when it exists and its modification time is
//! strictly newer than its source's. There is no content hash and no sidecar
//! manifest: the transcoded files themselves are the cache.
//!
//! This is cheap but weak. Copying a media folder without preserving
//! timestamps (or restoring an older source over a newer one) can make a stale
//! output look fresh. Touch the source or pass `--no-cache` to force a
//! re-encode.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Outcome of a freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Output exists and is newer than the source.
    Fresh,
    /// Output exists but is not newer than the source.
    Stale,
    /// No output yet.
    Missing,
}

/// Compare the modification times of a source and its transcoded output.
///
/// Errors only when the source itself cannot be stat'ed; an unreadable output
/// counts as [`Freshness::Missing`].
pub fn check_freshness(source: &Path, output: &Path) -> io::Result<Freshness> {
    let source_mtime = modified(source)?;
    let output_mtime = match modified(output) {
        Ok(t) => t,
        Err(_) => return Ok(Freshness::Missing),
    };
    if output_mtime > source_mtime {
        Ok(Freshness::Fresh)
    } else {
        Ok(Freshness::Stale)
    }
}

fn modified(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// Summary of cache behaviour for an optimizer run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
    pub failures: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn fail(&mut self) {
        self.failures += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses + self.failures
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = if self.failures > 0 {
            format!(", {} failed", self.failures)
        } else {
            String::new()
        };
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} encoded{} ({} total)",
                self.hits,
                self.misses,
                failed,
                self.total()
            )
        } else {
            write!(f, "{} encoded{}", self.misses, failed)
        }
    }
}
