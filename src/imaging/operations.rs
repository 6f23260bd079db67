//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, call the backend and measure
//! the result on disk.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_fit_width, savings_percent};
use super::params::{CompressParams, Quality};
use crate::naming::jpeg_output_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Tuning values for a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    pub max_width: u32,
    pub quality: Quality,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_width: 1920,
            quality: Quality::default(),
        }
    }
}

/// Size statistics for one compressed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub output_path: PathBuf,
    /// Bytes of the source file on disk.
    pub original_bytes: u64,
    /// Bytes of the written JPEG on disk.
    pub new_bytes: u64,
    /// `(1 - new / original) * 100`.
    pub savings_percent: f64,
    pub source_dimensions: Dimensions,
    pub output_dimensions: Dimensions,
}

impl CompressionStats {
    pub fn resized(&self) -> bool {
        self.source_dimensions != self.output_dimensions
    }
}

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Plan a compression without executing it.
///
/// Resolves the output path (`input.jpg` when none is given).
pub fn plan_compress(
    source: &Path,
    output: Option<&Path>,
    options: &CompressOptions,
) -> CompressParams {
    CompressParams {
        source: source.to_path_buf(),
        output: output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| jpeg_output_path(source)),
        max_width: options.max_width,
        quality: options.quality,
    }
}

/// Compress one image to JPEG and measure the savings.
///
/// The source is stat'ed once up front and that size is reused for the
/// result; the output is stat'ed after encoding. An output that cannot be
/// stat'ed is removed and reported as an encode error.
pub fn compress_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: Option<&Path>,
    options: &CompressOptions,
) -> Result<CompressionStats> {
    let original_bytes = std::fs::metadata(source)
        .map_err(|e| BackendError::decode(source, e))?
        .len();

    let params = plan_compress(source, output, options);
    let transform = backend.compress(&params)?;

    let new_bytes = match std::fs::metadata(&params.output) {
        Ok(meta) => meta.len(),
        Err(e) => {
            // An unmeasured output is not a saved one. The source is never removed.
            if params.output != source {
                let _ = std::fs::remove_file(&params.output);
            }
            return Err(BackendError::encode(&params.output, e));
        }
    };

    Ok(CompressionStats {
        savings_percent: savings_percent(original_bytes, new_bytes),
        output_path: params.output,
        original_bytes,
        new_bytes,
        source_dimensions: transform.source,
        output_dimensions: transform.output,
    })
}

/// What compressing a file would produce, without writing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressPlan {
    pub output_path: PathBuf,
    pub source_dimensions: Dimensions,
    pub output_dimensions: Dimensions,
}

/// Identify a source and compute the output it would get.
pub fn preview_compress(
    backend: &impl ImageBackend,
    source: &Path,
    options: &CompressOptions,
) -> Result<CompressPlan> {
    let (width, height) = get_dimensions(backend, source)?;
    let params = plan_compress(source, None, options);
    Ok(CompressPlan {
        output_path: params.output,
        source_dimensions: Dimensions { width, height },
        output_dimensions: calculate_fit_width((width, height), options.max_width).into(),
    })
}
