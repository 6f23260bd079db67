//! Pure calculation functions for image dimensions and sizes.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the output dimensions for fitting an image under a maximum width.
///
/// Images already at or below `max_width` keep their dimensions. Wider images
/// are scaled to exactly `max_width`, with the height scaled by the same ratio
/// and rounded to the nearest pixel (never below 1).
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `max_width` - Maximum output width in pixels
///
/// # Returns
/// * `(width, height)` - Output dimensions
///
/// # Examples
/// ```
/// # use asset_squeeze::imaging::calculate_fit_width;
/// // 3000x2000 under 1920 → 1920x1280
/// assert_eq!(calculate_fit_width((3000, 2000), 1920), (1920, 1280));
///
/// // Already narrow enough → unchanged
/// assert_eq!(calculate_fit_width((1000, 800), 1920), (1000, 800));
/// ```
pub fn calculate_fit_width(source: (u32, u32), max_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w <= max_width {
        return (src_w, src_h);
    }

    let ratio = max_width as f64 / src_w as f64;
    let h = (src_h as f64 * ratio).round() as u32;
    (max_width, h.max(1))
}

/// Percentage of bytes saved going from `original` to `new`.
///
/// Negative when the output grew. An empty original reports 0 rather than
/// dividing by zero.
pub fn savings_percent(original: u64, new: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - new as f64 / original as f64) * 100.0
}
