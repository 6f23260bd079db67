//! Image processing in pure Rust, with no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Normalize** | alpha flattened onto white, everything else → RGB8 |
//! | **Fit width** | Lanczos3 downscale, never upscale |
//! | **Encode** | `jpeg-encoder` with optimized Huffman tables |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and savings math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, Transform};
pub use calculations::{calculate_fit_width, savings_percent};
pub use operations::{
    CompressOptions, CompressPlan, CompressionStats, compress_image, get_dimensions,
    plan_compress, preview_compress,
};
pub use params::{CompressParams, Quality};
pub use rust_backend::RustBackend;
