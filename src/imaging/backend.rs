//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and compress.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust with no system
//! libraries. Everything is statically linked into the binary.

use super::params::CompressParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// Source is missing, unreadable, or not an image a compiled-in decoder accepts.
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    /// Destination could not be produced or written.
    #[error("Failed to encode {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
}

impl BackendError {
    pub fn decode(path: &Path, reason: impl fmt::Display) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn encode(path: &Path, reason: impl fmt::Display) -> Self {
        Self::Encode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel-level summary of a compress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    /// Dimensions of the decoded source.
    pub source: Dimensions,
    /// Dimensions written to the JPEG.
    pub output: Dimensions,
}

impl Transform {
    pub fn resized(&self) -> bool {
        self.source != self.output
    }
}

/// Trait for image processing backends.
///
/// Every backend must implement both operations so the rest of the codebase
/// is backend-agnostic.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode the source, flatten it to opaque RGB, fit it under the maximum
    /// width and write it as JPEG to the output path.
    fn compress(&self, params: &CompressParams) -> Result<Transform, BackendError>;
}
