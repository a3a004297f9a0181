//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the optimizer needs:
//! identify and transcode.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, zero
//! external dependencies. Tests use the recording `MockBackend` below.

use super::params::TranscodeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions as displayed (after EXIF orientation).
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source, resize to exactly the requested dimensions, and
    /// encode to the output path. A failed transcode must not leave a file at
    /// the output path.
    fn transcode(&self, params: &TranscodeParams) -> Result<(), BackendError>;
}
