//! Pure Rust image processing backend, no system libraries required.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Flatten alpha onto white | per-pixel blend over an `RgbImage` |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `jpeg-encoder` with optimized Huffman tables |
//!
//! ## Color modes
//!
//! JPEG has no alpha channel and no palettes, so every decoded image is
//! normalized to 8-bit RGB before encoding:
//!
//! - **RGB8** passes through untouched.
//! - **Anything with alpha** is composited over solid white, alpha as the mask.
//! - **Everything else** (grayscale, 16-bit, float) is converted directly.
//!
//! Palette-indexed PNGs never reach this step as palettes: the `png` decoder
//! expands them to RGB, or to RGBA when the file carries a transparency chunk,
//! so they follow the rules above.

use super::backend::{BackendError, Dimensions, ImageBackend, Transform};
use super::calculations::calculate_fit_width;
use super::params::{CompressParams, Quality};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, Rgb, RgbImage, Rgba};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Color mode of a decoded image, as far as JPEG normalization cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Opaque 8-bit RGB, already what the encoder wants.
    Rgb,
    /// Any layout carrying an alpha channel (including expanded palettes with `tRNS`).
    WithAlpha,
    /// Grayscale, 16-bit or float layouts without alpha.
    Other,
}

impl ColorMode {
    pub fn of(img: &DynamicImage) -> Self {
        match img {
            DynamicImage::ImageRgb8(_) => Self::Rgb,
            _ if img.color().has_alpha() => Self::WithAlpha,
            _ => Self::Other,
        }
    }
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file contents first, so a PNG saved with
/// the wrong extension still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| BackendError::decode(path, e))?
        .decode()
        .map_err(|e| BackendError::decode(path, e))
}

/// Blend one channel over white: `c * a + 255 * (1 - a)`, rounded.
#[inline]
fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Composite an image with alpha over an opaque white canvas of the same size.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

/// Bring any decoded image to opaque 8-bit RGB.
pub fn normalize(img: DynamicImage) -> RgbImage {
    match ColorMode::of(&img) {
        ColorMode::WithAlpha => flatten_onto_white(&img),
        ColorMode::Rgb | ColorMode::Other => img.into_rgb8(),
    }
}

/// Encode RGB pixels as a baseline JPEG with optimized Huffman tables.
fn encode_jpeg(img: &RgbImage, quality: Quality) -> Result<Vec<u8>, String> {
    let (width, height) = img.dimensions();
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(format!(
            "{width}x{height} exceeds the JPEG limit of {0}x{0}",
            u16::MAX
        ));
    };

    let mut buf = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut buf, quality.as_u8());
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(img.as_raw(), w, h, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| format!("JPEG encode failed: {e}"))?;
    Ok(buf)
}

/// Write the encoded bytes through a sibling temp file renamed over `path`.
///
/// A failed write leaves whatever was at `path` untouched, and the temp file
/// is deleted when it is dropped.
fn write_output(path: &Path, bytes: &[u8]) -> Result<(), BackendError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| BackendError::encode(path, e))?;
    tmp.write_all(bytes)
        .map_err(|e| BackendError::encode(path, e))?;
    tmp.persist(path)
        .map_err(|e| BackendError::encode(path, e.error))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| BackendError::decode(path, e))?
            .into_dimensions()
            .map_err(|e| BackendError::decode(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn compress(&self, params: &CompressParams) -> Result<Transform, BackendError> {
        let img = load_image(&params.source)?;
        let source = Dimensions {
            width: img.width(),
            height: img.height(),
        };
        let mode = ColorMode::of(&img);
        tracing::debug!(path = %params.source.display(), %source, ?mode, "decoded");

        let rgb = normalize(img);

        let output: Dimensions =
            calculate_fit_width((source.width, source.height), params.max_width).into();
        let rgb = if output != source {
            tracing::info!(
                path = %params.source.display(),
                from = %source,
                to = %output,
                "resized"
            );
            image::imageops::resize(&rgb, output.width, output.height, FilterType::Lanczos3)
        } else {
            rgb
        };

        let bytes =
            encode_jpeg(&rgb, params.quality).map_err(|e| BackendError::encode(&params.output, e))?;
        write_output(&params.output, &bytes)?;
        tracing::debug!(
            path = %params.output.display(),
            bytes = bytes.len(),
            quality = params.quality.value(),
            "encoded"
        );

        Ok(Transform { source, output })
    }
}
