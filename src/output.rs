//! CLI output formatting for every command.
//!
//! Output lists entries in manifest order: positional index, file name, and
//! date on the header line, with the served URL or per-file result indented
//! below. Logging (via `tracing`) goes to stderr; these summaries go to
//! stdout.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! 001 beach.jpg (image, 2020-01-01)
//!     /memories/beach.jpg
//! 002 party.mp4 (video, 2020-02-03)
//!     /memories/party.mp4
//!
//! 2 entries → public/memories.json
//! ```
//!
//! ## Optimize
//!
//! ```text
//! Images
//! 001 beach.jpg
//!     1440x1080: encoded
//! 002 sunset.png
//!     cached
//! 003 broken.jpg
//!     failed: Failed to decode broken.jpg: ...
//!
//! Videos
//! 001 party.mp4
//!
//! 1 cached, 1 encoded, 1 failed (3 total)
//! 3 entries → public/memories.json
//! ```
//!
//! ## Check
//!
//! ```text
//! public/memories.json: 3 entries (2 images, 1 video)
//!     2020-01-01 → 2020-02-03
//! OK
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::manifest::ManifestProblem;
use crate::optimize::{FileOutcome, OptimizeReport};
use crate::types::{MediaType, MemoryEntry};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn media_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Image => "image",
        MediaType::Video => "video",
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// ```text
/// 001 beach.jpg (image, 2020-01-01)
/// ```
fn entry_header(index: usize, entry: &MemoryEntry) -> String {
    format!(
        "{} {} ({}, {})",
        format_index(index),
        entry.filename,
        media_label(entry.media_type),
        entry.date.format("%Y-%m-%d")
    )
}

fn entry_count(n: usize) -> String {
    if n == 1 {
        "1 entry".to_string()
    } else {
        format!("{} entries", n)
    }
}

fn written_line(count: usize, manifest_path: &Path) -> String {
    format!("{} → {}", entry_count(count), manifest_path.display())
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(entries: &[MemoryEntry], manifest_path: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        lines.push(entry_header(i + 1, entry));
        lines.push(format!("{}{}", indent(1), entry.path));
    }
    if !entries.is_empty() {
        lines.push(String::new());
    }
    lines.push(written_line(entries.len(), manifest_path));
    lines
}

pub fn print_scan_output(entries: &[MemoryEntry], manifest_path: &Path) {
    for line in format_scan_output(entries, manifest_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Optimize
// ============================================================================

fn outcome_line(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Cached => "cached".to_string(),
        FileOutcome::Encoded { width, height } => format!("{}x{}: encoded", width, height),
        FileOutcome::Failed { reason } => format!("failed: {}", reason),
    }
}

pub fn format_optimize_output(report: &OptimizeReport, manifest_path: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.images.is_empty() {
        lines.push("Images".to_string());
        for (i, image) in report.images.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), image.filename));
            lines.push(format!("{}{}", indent(1), outcome_line(&image.outcome)));
        }
        lines.push(String::new());
    }

    if !report.videos.is_empty() {
        lines.push("Videos".to_string());
        for (i, name) in report.videos.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), name));
        }
        lines.push(String::new());
    }

    if report.cache_stats.total() > 0 {
        lines.push(report.cache_stats.to_string());
    }
    lines.push(written_line(report.entries.len(), manifest_path));
    lines
}

pub fn print_optimize_output(report: &OptimizeReport, manifest_path: &Path) {
    for line in format_optimize_output(report, manifest_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(
    entries: &[MemoryEntry],
    problems: &[ManifestProblem],
    manifest_path: &Path,
) -> Vec<String> {
    let videos = entries.iter().filter(|e| e.is_video()).count();
    let images = entries.len() - videos;

    let mut lines = vec![format!(
        "{}: {} ({}, {})",
        manifest_path.display(),
        entry_count(entries.len()),
        plural(images, "image"),
        plural(videos, "video")
    )];

    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        lines.push(format!(
            "{}{} → {}",
            indent(1),
            first.date.format("%Y-%m-%d"),
            last.date.format("%Y-%m-%d")
        ));
    }

    if problems.is_empty() {
        lines.push("OK".to_string());
    } else {
        lines.push(format!("{} found", plural(problems.len(), "problem")));
        for problem in problems {
            lines.push(format!("{}{}", indent(1), problem));
        }
    }
    lines
}

pub fn print_check_output(
    entries: &[MemoryEntry],
    problems: &[ManifestProblem],
    manifest_path: &Path,
) {
    for line in format_check_output(entries, problems, manifest_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Render
// ============================================================================

pub fn format_render_output(slides: usize, out: &Path) -> String {
    format!("Rendered {} → {}", plural(slides, "slide"), out.display())
}
