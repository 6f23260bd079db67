//! Shared test utilities for the asset-squeeze test suite.
//!
//! Writes small synthetic PNG fixtures in every color mode the compressor
//! distinguishes, and decodes/compares the JPEGs it produces.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let source = tmp.path().join("slide.png");
//! write_rgba_png(&source, 64, 32, |x, _| Rgba([0, 0, 0, (x * 4) as u8]));
//! ```

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::BufWriter;
use std::path::Path;

/// Color of palette index 1 in [`write_palette_png`].
pub const PALETTE_OPAQUE: [u8; 3] = [200, 30, 30];

/// Largest per-channel difference tolerated after a JPEG round trip.
pub const JPEG_TOLERANCE: u8 = 12;

// =========================================================================
// Fixture writers
// =========================================================================

/// Opaque RGB PNG with a simple gradient.
pub fn write_rgb_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// RGBA PNG with per-pixel colors from `pixel`.
pub fn write_rgba_png(path: &Path, width: u32, height: u32, pixel: impl Fn(u32, u32) -> Rgba<u8>) {
    let img = RgbaImage::from_fn(width, height, pixel);
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// Single-channel grayscale PNG filled with `level`.
pub fn write_gray_png(path: &Path, width: u32, height: u32, level: u8) {
    let img = image::GrayImage::from_pixel(width, height, image::Luma([level]));
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// Palette-indexed PNG: left half is index 0 (fully transparent), right half
/// is index 1 ([`PALETTE_OPAQUE`], fully opaque).
pub fn write_palette_png(path: &Path, width: u32, height: u32) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    let [r, g, b] = PALETTE_OPAQUE;
    encoder.set_palette(vec![0, 0, 0, r, g, b]);
    encoder.set_trns(vec![0, 255]);

    let data: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(|x| u8::from(x >= width / 2)))
        .collect();
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&data).unwrap();
}

// =========================================================================
// Output inspection
// =========================================================================

/// Decode a written JPEG, asserting it really is one.
pub fn decode_jpeg(path: &Path) -> DynamicImage {
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[0..2], &[0xFF, 0xD8], "{} is not a JPEG", path.display());
    image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap()
}

/// Assert a decoded pixel is within [`JPEG_TOLERANCE`] of `expected` on every channel.
pub fn assert_near(actual: Rgb<u8>, expected: [u8; 3]) {
    for (channel, (a, e)) in actual.0.iter().zip(expected).enumerate() {
        assert!(
            a.abs_diff(e) <= JPEG_TOLERANCE,
            "channel {channel}: got {:?}, expected {:?}",
            actual.0,
            expected
        );
    }
}
