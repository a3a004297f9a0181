//! Image transcoding — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader` header decode + EXIF orientation |
//! | **Transcode → AVIF** | Lanczos3 resize + rav1e encoder |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_fit_dimensions;
pub use operations::{
    TranscodeConfig, TranscodedImage, get_dimensions, output_filename, transcode_image,
};
pub use params::{Quality, TranscodeParams};
pub use rust_backend::RustBackend;
