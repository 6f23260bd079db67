//! # Asset Squeeze
//!
//! Batch-converts presentation image assets (PNG expected) into resized,
//! optimized JPEG files and reports how many bytes each conversion saved.
//!
//! # Pipeline
//!
//! Every file goes through the same four steps:
//!
//! ```text
//! 1. Decode     source.png  →  bitmap          (any compiled-in raster format)
//! 2. Normalize  bitmap      →  opaque RGB8     (alpha flattened onto white)
//! 3. Fit        RGB8        →  ≤ max_width     (Lanczos3, never upscales)
//! 4. Encode     RGB8        →  source.jpg      (optimized Huffman tables)
//! ```
//!
//! The batch driver wraps this per file, turning every missing or broken input
//! into a recorded outcome instead of an abort.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pure-Rust image operations: decode, normalize, fit, encode, measure |
//! | [`process`] | Batch driver: per-file outcomes, totals, progress events, dry-run check |
//! | [`config`] | `max_width` / `quality` defaults, TOML loading, validation |
//! | [`naming`] | Output path derivation (`name.png` → `name.jpg`) |
//! | [`output`] | CLI output formatting for progress, summary and check results |
//!
//! # Design Decisions
//!
//! ## White, Not Black, Behind Transparency
//!
//! JPEG has no alpha channel. Dropping alpha outright exposes whatever color
//! the transparent pixels happen to store, usually black. Slide assets sit on
//! light backgrounds, so transparency is composited over white instead.
//!
//! ## Sizes Come From Disk
//!
//! Savings are computed from the actual byte counts of the source and the
//! written JPEG, not from encoder buffers. The source is stat'ed once, before
//! decoding.
//!
//! ## Failures Are Data
//!
//! The compressor returns errors; the driver records them as
//! [`process::FileOutcome`] values and moves on. Presentation lives in
//! [`output`], so the same report feeds the console and the JSON report file.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
