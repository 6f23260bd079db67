//! Output filename derivation.
//!
//! A compressed asset lands next to its source with the extension swapped:
//! - `assets/personas/celia.png` → `assets/personas/celia.jpg`
//! - `santa-rita.PNG` → `santa-rita.jpg`
//! - `README` → `README.jpg`
//!
//! Only the last extension is replaced, so `deck.v2.png` → `deck.v2.jpg`.

use std::path::{Path, PathBuf};

/// Extension written for every compressed output.
pub const JPEG_EXTENSION: &str = "jpg";

/// Derive the default output path for a source image.
pub fn jpeg_output_path(source: &Path) -> PathBuf {
    source.with_extension(JPEG_EXTENSION)
}

/// Whether compressing `source` would write over it.
///
/// `output` is the explicit destination, if any. Without one this is true for
/// sources that already carry the `.jpg` extension.
pub fn overwrites_source(source: &Path, output: Option<&Path>) -> bool {
    match output {
        Some(output) => output == source,
        None => jpeg_output_path(source) == source,
    }
}

/// Display name for console output: the file name, or the whole path when
/// there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
