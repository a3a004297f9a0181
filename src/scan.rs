//! Media folder scanning.
//!
//! Produces a manifest entry for every supported photo and video in the media
//! folder, pointing at the original files. The folder is flat: subdirectories
//! (including the optimizer's output folder) are not descended into.
//!
//! ```text
//! public/
//! ├── memories.json            # written from the scan result
//! └── memories/
//!     ├── beach.jpg            → image, /memories/beach.jpg
//!     ├── birthday.MOV         → video, /memories/birthday.MOV
//!     ├── notes.txt            (ignored)
//!     └── optimized/           (ignored)
//! ```
//!
//! Entries are ordered by file modification time. There is no EXIF parsing;
//! dates can be corrected by hand in the manifest afterwards.
//!
//! Any filesystem error aborts the scan. Nothing is written on failure.

use crate::config::MediaLayout;
use crate::types::{IMAGE_EXTENSIONS, MediaType, MemoryEntry, VIDEO_EXTENSIONS, has_extension};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to list media folder: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("File name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),
}

/// Scan the media folder and return entries sorted ascending by date.
///
/// Creates the media folder if it does not exist yet (yielding an empty
/// list).
pub fn scan(layout: &MediaLayout) -> Result<Vec<MemoryEntry>, ScanError> {
    let media_dir = &layout.media_dir;
    if !media_dir.exists() {
        warn!(dir = %media_dir.display(), "media folder not found, creating it");
        fs::create_dir_all(media_dir)?;
    }

    info!(dir = %media_dir.display(), "scanning media folder");

    let supported: Vec<&str> = IMAGE_EXTENSIONS
        .iter()
        .chain(VIDEO_EXTENSIONS)
        .copied()
        .collect();

    let mut entries = Vec::new();
    for path in list_media_files(media_dir, &supported)? {
        let filename = file_name(&path)?;
        let date = modified_at(&path)?;
        let media_type = MediaType::from_path(&path);
        debug!(file = filename, ?media_type, %date, "found media");

        entries.push(MemoryEntry::new(
            filename,
            layout.original_url(filename),
            media_type,
            date,
        ));
    }

    crate::types::sort_by_date(&mut entries);
    info!(count = entries.len(), "scan complete");
    Ok(entries)
}

/// List regular files directly inside `dir` whose extension is in
/// `extensions`, sorted by file name. The first unreadable entry aborts.
pub fn list_media_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, walkdir::Error> {
    list_media_entries(dir, extensions)?.into_iter().collect()
}

/// Like [`list_media_files`], but an entry that cannot be read (a dangling
/// symlink, a permission error) is returned in place instead of ending the
/// listing. Only a failure to read `dir` itself is an error.
///
/// Unreadable entries are kept when their name carries one of `extensions`
/// or when walkdir could not name them at all.
pub fn list_media_entries(
    dir: &Path,
    extensions: &[&str],
) -> Result<Vec<Result<PathBuf, walkdir::Error>>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    files.push(Ok(entry.into_path()));
                }
            }
            Err(e) if e.depth() == 0 => return Err(e),
            Err(e) => {
                if e.path().is_none_or(|p| has_extension(p, extensions)) {
                    files.push(Err(e));
                }
            }
        }
    }
    Ok(files)
}

/// Modification time of a file as a UTC timestamp.
pub fn modified_at(path: &Path) -> std::io::Result<DateTime<Utc>> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}

fn file_name(path: &Path) -> Result<&str, ScanError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ScanError::NonUtf8Name(path.to_path_buf()))
}
