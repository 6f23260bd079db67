//! Compression configuration.
//!
//! Two tuning values control every run: the maximum output width and the JPEG
//! quality. Stock defaults are overridden by an optional TOML file, which in
//! turn is overridden by CLI flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! max_width = 1920  # Wider images are downscaled to this width (pixels)
//! quality = 85      # JPEG quality (1-100)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! quality = 78
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{CompressOptions, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Compression settings loaded from a TOML file.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressConfig {
    /// Maximum output width in pixels. Narrower images are never upscaled.
    pub max_width: u32,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            quality: 85,
        }
    }
}

impl CompressConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::Validation(
                "max_width must be at least 1".into(),
            ));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        Ok(())
    }

    /// Apply CLI overrides on top of the loaded values, then re-validate.
    pub fn with_overrides(
        mut self,
        max_width: Option<u32>,
        quality: Option<u32>,
    ) -> Result<Self, ConfigError> {
        if let Some(w) = max_width {
            self.max_width = w;
        }
        if let Some(q) = quality {
            self.quality = q;
        }
        self.validate()?;
        Ok(self)
    }

    /// Convert into the options the imaging layer consumes.
    pub fn options(&self) -> CompressOptions {
        CompressOptions {
            max_width: self.max_width,
            quality: Quality::new(self.quality),
        }
    }
}

/// Load config from an optional TOML file.
///
/// Without a path the stock defaults are used. With one, the file must exist;
/// keys it omits keep their defaults, unknown keys are rejected, and the
/// result is validated.
pub fn load_config(path: Option<&Path>) -> Result<CompressConfig, ConfigError> {
    let config = match path {
        Some(p) => toml::from_str::<CompressConfig>(&fs::read_to_string(p)?)?,
        None => CompressConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# asset-squeeze configuration
# ===========================
#
# Pass this file with `asset-squeeze --config squeeze.toml compress ...`.
# Every key is optional; omitted keys keep the defaults shown here.
# CLI flags (--max-width, --quality) override values from this file.

# Images wider than this many pixels are downscaled to exactly this width.
# Height follows the original aspect ratio. Narrower images are left as-is;
# nothing is ever upscaled.
max_width = 1920

# JPEG quality, 1 (smallest, worst) to 100 (largest, best).
# 85 keeps slide photos visually clean at a fraction of the PNG size.
quality = 85
"##
}
