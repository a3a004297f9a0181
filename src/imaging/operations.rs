//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_fit_dimensions;
use super::params::{Quality, TranscodeParams};
use crate::config::OptimizeConfig;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Extension of every transcoded file.
pub const OUTPUT_EXTENSION: &str = "avif";

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Name of the transcoded file for a source file: same stem, `.avif`.
///
/// ```
/// # use memories::imaging::output_filename;
/// assert_eq!(output_filename("IMG_0042.JPG"), "IMG_0042.avif");
/// assert_eq!(output_filename("beach.webp"), "beach.avif");
/// ```
pub fn output_filename(source_filename: &str) -> String {
    let stem = Path::new(source_filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source_filename.to_string());
    format!("{}.{}", stem, OUTPUT_EXTENSION)
}

/// Configuration for transcoding.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: Quality,
}

impl TranscodeConfig {
    pub fn from_optimize_config(config: &OptimizeConfig) -> Self {
        Self {
            max_width: config.max_width,
            max_height: config.max_height,
            quality: Quality::new(config.quality),
        }
    }
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self::from_optimize_config(&OptimizeConfig::default())
    }
}

/// Dimensions of a freshly transcoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodedImage {
    pub width: u32,
    pub height: u32,
}

/// Plan a transcode without executing it.
pub fn plan_transcode(
    source: &Path,
    output: &Path,
    original_dims: (u32, u32),
    config: &TranscodeConfig,
) -> TranscodeParams {
    let (width, height) =
        calculate_fit_dimensions(original_dims, (config.max_width, config.max_height));
    TranscodeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Identify the source, fit it inside the configured box, and encode it to
/// `output`.
pub fn transcode_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &TranscodeConfig,
) -> Result<TranscodedImage> {
    let dims = get_dimensions(backend, source)?;
    let params = plan_transcode(source, output, dims, config);
    backend.transcode(&params)?;
    Ok(TranscodedImage {
        width: params.width,
        height: params.height,
    })
}
