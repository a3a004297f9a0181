//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the largest size that fits inside a bounding box while keeping
/// the source aspect ratio. Images already inside the box are returned
/// unchanged (never upscaled).
///
/// # Arguments
/// * `original` - Source image dimensions (width, height)
/// * `bounds` - Bounding box (max width, max height)
///
/// # Examples
/// ```
/// # use memories::imaging::calculate_fit_dimensions;
/// // 4000x3000 into 1920x1080 → height-bound
/// assert_eq!(calculate_fit_dimensions((4000, 3000), (1920, 1080)), (1440, 1080));
///
/// // Smaller than the box: untouched
/// assert_eq!(calculate_fit_dimensions((800, 600), (1920, 1080)), (800, 600));
/// ```
pub fn calculate_fit_dimensions(original: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = original;
    let (max_w, max_h) = bounds;

    if src_w == 0 || src_h == 0 || (src_w <= max_w && src_h <= max_h) {
        return original;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FHD: (u32, u32) = (1920, 1080);

    #[test]
    fn landscape_wider_than_box_is_width_bound() {
        // 3840x1600 (2.4:1) → width matches, height = 1600 * 0.5 = 800
        assert_eq!(calculate_fit_dimensions((3840, 1600), FHD), (1920, 800));
    }

    #[test]
    fn landscape_taller_than_box_is_height_bound() {
        // 4000x3000 (4:3) → height matches, width = 4000 * 0.36 = 1440
        assert_eq!(calculate_fit_dimensions((4000, 3000), FHD), (1440, 1080));
    }

    #[test]
    fn portrait_is_height_bound() {
        // 3000x4000 → height 1080, width = 3000 * 0.27 = 810
        assert_eq!(calculate_fit_dimensions((3000, 4000), FHD), (810, 1080));
    }

    #[test]
    fn exact_sixteen_by_nine_scales_to_box() {
        assert_eq!(calculate_fit_dimensions((3840, 2160), FHD), (1920, 1080));
    }

    #[test]
    fn smaller_image_is_never_upscaled() {
        assert_eq!(calculate_fit_dimensions((640, 480), FHD), (640, 480));
    }

    #[test]
    fn image_exactly_box_size_unchanged() {
        assert_eq!(calculate_fit_dimensions(FHD, FHD), FHD);
    }

    #[test]
    fn only_one_edge_over_the_box() {
        // 2000x500 → width-bound: scale 0.96, height 480
        assert_eq!(calculate_fit_dimensions((2000, 500), FHD), (1920, 480));
    }

    #[test]
    fn extreme_panorama_keeps_at_least_one_pixel() {
        assert_eq!(calculate_fit_dimensions((100_000, 10), FHD), (1920, 1));
    }
}
