//! Shared types serialized into the manifest.
//!
//! Both producers (scan, optimize) and the slideshow controller read and write
//! the same [`MemoryEntry`] shape, so it lives here rather than in either stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Image extensions the scanner accepts.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Video extensions. Videos are never transcoded.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov"];

/// Image extensions the optimizer knows how to decode and transcode.
/// GIF is intentionally absent: animated frames would be flattened.
pub const OPTIMIZABLE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Kind of media an entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Classify a file by extension: video extensions map to `Video`,
    /// everything else to `Image`.
    pub fn from_path(path: &Path) -> Self {
        match lowercase_extension(path) {
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => MediaType::Video,
            _ => MediaType::Image,
        }
    }
}

/// One slideshow entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Base name of the original source file.
    pub filename: String,
    /// Root-relative URL of the (possibly transcoded) media.
    pub path: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Ordering timestamp, taken from the source file's modification time.
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub caption: String,
}

impl MemoryEntry {
    pub fn new(
        filename: impl Into<String>,
        path: impl Into<String>,
        media_type: MediaType,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            filename: filename.into(),
            path: path.into(),
            media_type,
            date,
            caption: String::new(),
        }
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }
}

/// Lowercased extension of a path, if it has one.
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// True if the path's extension is one of `extensions` (case-insensitive).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    lowercase_extension(path).is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Sort entries ascending by date. Stable, so entries sharing a timestamp
/// keep the order they were listed in.
pub fn sort_by_date(entries: &mut [MemoryEntry]) {
    entries.sort_by_key(|e| e.date);
}

/// ISO-8601 UTC timestamps with millisecond precision (`2020-01-01T00:00:00.000Z`).
///
/// Reading accepts any RFC 3339 timestamp so hand-edited manifests with a
/// different precision or offset still load.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
