//! Pure Rust image processing backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::TranscodeParams;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::path::{Path, PathBuf};

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

fn decode_failed(path: &Path, e: impl std::fmt::Display) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Orientations that swap width and height when applied.
fn swaps_axes(orientation: Orientation) -> bool {
    matches!(
        orientation,
        Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH
    )
}

/// Load and decode an image from disk, upright according to its EXIF orientation.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(|e| decode_failed(path, e))?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_failed(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Sibling path the encoder writes to before the final rename.
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    output.with_file_name(name)
}

/// Encode and save as AVIF using rav1e (speed=6 for reasonable throughput).
///
/// The encoder writes to a `.partial` sibling which is renamed into place on
/// success, so an interrupted or failed encode never leaves an output that
/// the freshness check would treat as cached.
fn save_avif(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let partial = partial_path(path);
    let result: Result<(), BackendError> = (|| {
        let file = std::fs::File::create(&partial)?;
        let writer = std::io::BufWriter::new(file);
        let encoder =
            image::codecs::avif::AvifEncoder::new_with_speed_quality(writer, 6, quality as u8);
        img.write_with_encoder(encoder)
            .map_err(|e| BackendError::ProcessingFailed(format!("AVIF encode failed: {}", e)))?;
        std::fs::rename(&partial, path)?;
        Ok(())
    })();
    if result.is_err() {
        let _ = std::fs::remove_file(&partial);
    }
    result
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()
            .map_err(|e| {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
            })?;
        let (width, height) = decoder.dimensions();
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        if swaps_axes(orientation) {
            Ok(Dimensions {
                width: height,
                height: width,
            })
        } else {
            Ok(Dimensions { width, height })
        }
    }

    fn transcode(&self, params: &TranscodeParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let resized = if (img.width(), img.height()) == (params.width, params.height) {
            img
        } else {
            img.resize_exact(params.width, params.height, FilterType::Lanczos3)
        };
        // The AVIF encoder only takes 8-bit RGB(A).
        let encodable = if resized.color().has_alpha() {
            DynamicImage::ImageRgba8(resized.to_rgba8())
        } else {
            DynamicImage::ImageRgb8(resized.to_rgb8())
        };
        save_avif(&encodable, &params.output, params.quality.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Quality;
    use crate::test_helpers::write_test_jpeg;

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        write_test_jpeg(&path, 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/image.jpg"));
        assert!(result.is_err());
    }

    #[test]
    fn transcode_synthetic_to_avif() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        write_test_jpeg(&source, 400, 300);

        let output = tmp.path().join("source.avif");
        RustBackend::new()
            .transcode(&TranscodeParams {
                source,
                output: output.clone(),
                width: 200,
                height: 150,
                quality: Quality::new(80),
            })
            .unwrap();

        assert!(output.exists());
        assert!(std::fs::metadata(&output).unwrap().len() > 0);
        assert!(!partial_path(&output).exists());
    }

    #[test]
    fn transcode_garbage_source_leaves_no_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let output = tmp.path().join("broken.avif");
        let result = RustBackend::new().transcode(&TranscodeParams {
            source,
            output: output.clone(),
            width: 10,
            height: 10,
            quality: Quality::default(),
        });

        assert!(result.is_err());
        assert!(!output.exists());
        assert!(!partial_path(&output).exists());
    }

    #[test]
    fn partial_path_is_sibling() {
        assert_eq!(
            partial_path(Path::new("/out/a.avif")),
            Path::new("/out/a.avif.partial")
        );
    }
}
