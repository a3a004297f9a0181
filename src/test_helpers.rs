//! Shared test utilities for the memories test suite.
//!
//! Tests build their media folders on the fly in a `TempDir` and pin file
//! modification times, since mtimes drive both manifest ordering and the
//! optimizer cache.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let layout = test_layout(tmp.path());
//! touch_at(&layout.media_dir.join("b.jpg"), days(2));
//! touch_at(&layout.media_dir.join("a.mp4"), days(1));
//!
//! let entries = scan(&layout).unwrap();
//! assert_eq!(filenames(&entries), vec!["a.mp4", "b.jpg"]);
//! assert_sorted_by_date(&entries);
//! ```

use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use image::{ImageEncoder, RgbImage};

use crate::config::{MediaLayout, MemoriesConfig};
use crate::types::{MediaType, MemoryEntry};

// =========================================================================
// Layout and file setup
// =========================================================================

/// Default layout rooted at `root` (media in `root/memories`).
pub fn test_layout(root: &Path) -> MediaLayout {
    MediaLayout::new(root, &MemoriesConfig::default())
}

pub fn days(n: u64) -> Duration {
    Duration::from_secs(n * 24 * 60 * 60)
}

/// `UNIX_EPOCH + offset` as a chrono timestamp.
pub fn epoch_plus(offset: Duration) -> DateTime<Utc> {
    DateTime::<Utc>::from(UNIX_EPOCH + offset)
}

/// Create an empty file (and its parents) last modified at `UNIX_EPOCH + offset`.
pub fn touch_at(path: &Path, offset: Duration) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
    set_mtime(path, offset);
}

/// Set an existing file's mtime to `UNIX_EPOCH + offset`.
pub fn set_mtime(path: &Path, offset: Duration) {
    let time: SystemTime = UNIX_EPOCH + offset;
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// Write a real JPEG with a simple gradient.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Entries
// =========================================================================

/// An entry served from `/memories/<filename>`, dated `n` days after the epoch.
pub fn memory(filename: &str, day: u64) -> MemoryEntry {
    MemoryEntry::new(
        filename,
        format!("/memories/{filename}"),
        MediaType::from_path(Path::new(filename)),
        epoch_plus(days(day)),
    )
}

/// Entries dated one day apart, in the given order.
pub fn memories(filenames: &[&str]) -> Vec<MemoryEntry> {
    filenames
        .iter()
        .enumerate()
        .map(|(i, name)| memory(name, i as u64 + 1))
        .collect()
}

// =========================================================================
// Entry extractors and assertions
// =========================================================================

pub fn filenames(entries: &[MemoryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.filename.as_str()).collect()
}

/// Assert entries are in non-decreasing date order.
pub fn assert_sorted_by_date(entries: &[MemoryEntry]) {
    for pair in entries.windows(2) {
        assert!(
            pair[0].date <= pair[1].date,
            "'{}' ({}) sorts before '{}' ({})",
            pair[0].filename,
            pair[0].date,
            pair[1].filename,
            pair[1].date
        );
    }
}
