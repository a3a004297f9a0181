//! Image optimization and manifest generation.
//!
//! The alternative to [`scan`](crate::scan): instead of pointing the manifest
//! at the original files, photos are transcoded to AVIF, shrunk to fit a
//! bounding box, and the manifest points at the transcoded copies. Videos are
//! listed as-is.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── memories.json                # points at optimized/ for photos
//! └── memories/
//!     ├── beach.jpg
//!     ├── sunset.png
//!     ├── party.mp4                # → /memories/party.mp4 (untouched)
//!     └── optimized/
//!         ├── beach.avif           # ≤ 1920x1080, quality 80
//!         └── sunset.avif
//! ```
//!
//! ## Caching
//!
//! A transcoded file newer than its source is reused without decoding the
//! source again (see [`cache`](crate::cache)). Re-running with no source
//! changes encodes nothing.
//!
//! ## Failure isolation
//!
//! Files are processed one at a time. A file that cannot be read, decoded,
//! or encoded is logged and left out of the manifest; the run continues with
//! the next file. That includes entries the directory listing itself cannot
//! read, such as dangling symlinks. Only failing to prepare or open the media
//! folder aborts.

use crate::cache::{CacheStats, Freshness, check_freshness};
use crate::config::MediaLayout;
use crate::imaging::{ImageBackend, TranscodeConfig, output_filename, transcode_image};
use crate::scan::{list_media_entries, modified_at};
use crate::types::{
    MediaType, MemoryEntry, OPTIMIZABLE_EXTENSIONS, VIDEO_EXTENSIONS, has_extension,
    sort_by_date,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to list media folder: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What happened to one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// An up-to-date transcoded file already existed.
    Cached,
    /// The image was transcoded in this run.
    Encoded { width: u32, height: u32 },
    /// The image was skipped and has no manifest entry.
    Failed { reason: String },
}

/// Per-image result, in processing (file name) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub filename: String,
    pub outcome: FileOutcome,
}

/// Result of an optimizer run.
#[derive(Debug)]
pub struct OptimizeReport {
    /// Manifest entries (images and videos), sorted ascending by date.
    pub entries: Vec<MemoryEntry>,
    pub images: Vec<FileReport>,
    pub videos: Vec<String>,
    pub cache_stats: CacheStats,
}

impl OptimizeReport {
    /// Number of images transcoded in this run.
    pub fn encoded(&self) -> u32 {
        self.cache_stats.misses
    }
}

/// Optimize every image in the media folder and build the manifest entries.
///
/// With `use_cache` off, every image is re-encoded regardless of timestamps.
pub fn optimize(
    backend: &impl ImageBackend,
    layout: &MediaLayout,
    config: &TranscodeConfig,
    use_cache: bool,
) -> Result<OptimizeReport, OptimizeError> {
    fs::create_dir_all(&layout.optimized_dir)?;
    info!(
        dir = %layout.media_dir.display(),
        max_width = config.max_width,
        max_height = config.max_height,
        quality = config.quality.value(),
        "optimizing images"
    );

    let mut entries = Vec::new();
    let mut images = Vec::new();
    let mut cache_stats = CacheStats::default();
    // Output name → source that claimed it, so `a.jpg` and `a.png` can't
    // silently share `a.avif`.
    let mut claimed: HashMap<String, String> = HashMap::new();

    let mut videos = Vec::new();
    let extensions: Vec<&str> = OPTIMIZABLE_EXTENSIONS
        .iter()
        .chain(VIDEO_EXTENSIONS)
        .copied()
        .collect();

    for listed in list_media_entries(&layout.media_dir, &extensions)? {
        let source = match listed {
            Ok(source) => source,
            Err(e) => {
                let unreadable = e.path().map(Path::to_path_buf).unwrap_or_default();
                if has_extension(&unreadable, VIDEO_EXTENSIONS) {
                    error!(
                        file = %unreadable.display(),
                        error = %e,
                        "failed to read video, skipping"
                    );
                } else {
                    let filename = display_name(&unreadable);
                    error!(file = %filename, error = %e, "failed to read image, skipping");
                    cache_stats.fail();
                    images.push(FileReport {
                        filename,
                        outcome: FileOutcome::Failed {
                            reason: e.to_string(),
                        },
                    });
                }
                continue;
            }
        };

        if has_extension(&source, VIDEO_EXTENSIONS) {
            match video_entry(layout, &source) {
                Ok(entry) => {
                    debug!(file = %entry.filename, "linked video");
                    videos.push(entry.filename.clone());
                    entries.push(entry);
                }
                Err(reason) => {
                    error!(file = %source.display(), %reason, "failed to read video, skipping");
                }
            }
            continue;
        }

        let filename = display_name(&source);
        let result = optimize_image(backend, layout, config, use_cache, &source, &mut claimed);
        let outcome = match result {
            Ok((entry, outcome)) => {
                entries.push(entry);
                outcome
            }
            Err(reason) => {
                error!(file = %filename, %reason, "failed to optimize image, skipping");
                FileOutcome::Failed { reason }
            }
        };

        match &outcome {
            FileOutcome::Cached => {
                debug!(file = %filename, "up to date");
                cache_stats.hit();
            }
            FileOutcome::Encoded { width, height } => {
                info!(file = %filename, width, height, "encoded");
                cache_stats.miss();
            }
            FileOutcome::Failed { .. } => cache_stats.fail(),
        }
        images.push(FileReport { filename, outcome });
    }

    sort_by_date(&mut entries);
    info!(
        encoded = cache_stats.misses,
        cached = cache_stats.hits,
        failed = cache_stats.failures,
        total = entries.len(),
        "optimization complete"
    );

    Ok(OptimizeReport {
        entries,
        images,
        videos,
        cache_stats,
    })
}

fn optimize_image(
    backend: &impl ImageBackend,
    layout: &MediaLayout,
    config: &TranscodeConfig,
    use_cache: bool,
    source: &Path,
    claimed: &mut HashMap<String, String>,
) -> Result<(MemoryEntry, FileOutcome), String> {
    let filename = utf8_file_name(source)?;
    let target_name = output_filename(filename);

    if let Some(owner) = claimed.get(&target_name) {
        return Err(format!("{} is already produced from {}", target_name, owner));
    }
    claimed.insert(target_name.clone(), filename.to_string());

    let date = modified_at(source).map_err(|e| e.to_string())?;
    let target = layout.optimized_dir.join(&target_name);

    let fresh = use_cache
        && check_freshness(source, &target).map_err(|e| e.to_string())? == Freshness::Fresh;

    let outcome = if fresh {
        FileOutcome::Cached
    } else {
        let result =
            transcode_image(backend, source, &target, config).map_err(|e| e.to_string())?;
        FileOutcome::Encoded {
            width: result.width,
            height: result.height,
        }
    };

    let entry = MemoryEntry::new(
        filename,
        layout.optimized_file_url(&target_name),
        MediaType::Image,
        date,
    );
    Ok((entry, outcome))
}

fn video_entry(layout: &MediaLayout, source: &Path) -> Result<MemoryEntry, String> {
    let filename = utf8_file_name(source)?;
    let date = modified_at(source).map_err(|e| e.to_string())?;
    Ok(MemoryEntry::new(
        filename,
        layout.original_url(filename),
        MediaType::Video,
        date,
    ))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "<unnamed>".to_string())
}

fn utf8_file_name(path: &Path) -> Result<&str, String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("file name is not valid UTF-8: {}", path.display()))
}
