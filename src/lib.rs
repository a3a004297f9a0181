//! # Memories
//!
//! A photo and video slideshow built from a flat folder of media files.
//! Drop files into the media folder, generate the manifest, and serve the web
//! root from any static file server.
//!
//! # Architecture: Offline Pipeline, Runtime Controller
//!
//! ```text
//! scan       memories/  →  memories.json   (originals, as-is)
//!   or
//! optimize   memories/  →  memories/optimized/*.avif + memories.json
//!
//! slideshow  memories.json  →  slides, navigation, lazy loading, autoplay
//! ```
//!
//! `scan` and `optimize` are alternatives that write the same manifest shape:
//! a JSON array of [`MemoryEntry`](types::MemoryEntry) sorted oldest first by
//! file modification time. The slideshow reads that manifest exactly once.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists the media folder into manifest entries pointing at originals |
//! | [`optimize`] | Transcodes photos to AVIF and lists them with the untouched videos |
//! | [`manifest`] | Reads, writes, and validates `memories.json` |
//! | [`slideshow`] | Controller state machine and its maud rendering |
//! | [`imaging`] | Pure-Rust image operations: identify, fit-inside resize, AVIF encode |
//! | [`cache`] | Timestamp-based freshness checks for transcoded images |
//! | [`config`] | `memories.toml` loading and the on-disk/URL layout |
//! | [`types`] | The manifest entry and media classification |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Modification Time Is the Date
//!
//! Entries are dated by file modification time, not EXIF. Copying files in a
//! different order or touching them reorders the slideshow; that is the
//! intended knob. Ties keep file name order.
//!
//! ## AVIF Output
//!
//! Optimized photos are AVIF only. The encoder is pure Rust (`rav1e` through
//! the `image` crate), so the binary needs no system libraries.
//!
//! ## Explicit Time
//!
//! The slideshow controller never reads the clock. Every call that can start
//! or restart the autoplay timer takes an `Instant`, which keeps the
//! controller deterministic under test and free of background threads.

pub mod cache;
pub mod config;
pub mod imaging;
pub mod manifest;
pub mod optimize;
pub mod output;
pub mod scan;
pub mod slideshow;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
