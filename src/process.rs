//! Batch compression driver.
//!
//! Takes an ordered list of input paths and compresses each one in turn,
//! isolating failures so one bad file never aborts the batch.
//!
//! ## Per-file outcomes
//!
//! ```text
//! path missing        → Missing      (no compression attempted, 0 bytes counted)
//! decode/encode error → Failed       (error detail kept, batch continues)
//! otherwise           → Compressed   (sizes added to the batch totals)
//! ```
//!
//! ## Progress
//!
//! Files are processed sequentially. When a [`ProcessEvent`] sender is
//! supplied, one event is sent as each file starts and finishes so the CLI can
//! print progress while the batch runs. The final [`BatchReport`] carries the
//! same information in input order.

use crate::imaging::{
    CompressOptions, CompressPlan, CompressionStats, ImageBackend, RustBackend, compress_image,
    preview_compress,
};
use crate::naming::{display_name, overwrites_source};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// Result of handling one input path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Compressed(CompressionStats),
    Missing,
    Failed { error: String },
}

/// One input path and what happened to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

/// Everything a batch run produced, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    /// Sum of source sizes over successfully compressed files.
    pub total_original_bytes: u64,
    /// Sum of output sizes over successfully compressed files.
    pub total_new_bytes: u64,
}

impl BatchReport {
    fn record(&mut self, source: &Path, outcome: FileOutcome) {
        if let FileOutcome::Compressed(stats) = &outcome {
            self.total_original_bytes += stats.original_bytes;
            self.total_new_bytes += stats.new_bytes;
        }
        self.files.push(FileReport {
            source: source.to_path_buf(),
            outcome,
        });
    }

    /// Overall savings across compressed files; 0 when nothing was compressed.
    pub fn total_savings_percent(&self) -> f64 {
        crate::imaging::savings_percent(self.total_original_bytes, self.total_new_bytes)
    }

    pub fn compressed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Compressed(_)))
    }

    pub fn missing_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Missing))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

/// Progress events sent while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    FileMissing { name: String },
    FileStarted { name: String },
    FileCompressed { name: String, stats: CompressionStats },
    FileFailed { name: String, error: String },
}

/// Compress every input with the pure Rust backend.
///
/// `output` overrides the destination and is only meaningful for a single
/// input; callers are expected to enforce that.
pub fn process(
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: &CompressOptions,
    events: Option<Sender<ProcessEvent>>,
) -> BatchReport {
    let backend = RustBackend::new();
    process_with_backend(&backend, inputs, output, options, events)
}

/// Process inputs using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: &CompressOptions,
    events: Option<Sender<ProcessEvent>>,
) -> BatchReport {
    let emit = |event: ProcessEvent| {
        if let Some(tx) = &events {
            // The receiver only prints; a closed channel must not stop the batch.
            let _ = tx.send(event);
        }
    };

    let mut report = BatchReport::default();

    for source in inputs {
        let name = display_name(source);

        if !source.exists() {
            tracing::warn!(path = %source.display(), "input not found, skipping");
            emit(ProcessEvent::FileMissing { name });
            report.record(source, FileOutcome::Missing);
            continue;
        }

        emit(ProcessEvent::FileStarted { name: name.clone() });
        if overwrites_source(source, output) {
            tracing::warn!(path = %source.display(), "output replaces the source file");
        }

        let outcome = match compress_image(backend, source, output, options) {
            Ok(stats) => {
                tracing::info!(
                    path = %source.display(),
                    original_bytes = stats.original_bytes,
                    new_bytes = stats.new_bytes,
                    "compressed"
                );
                emit(ProcessEvent::FileCompressed {
                    name,
                    stats: stats.clone(),
                });
                FileOutcome::Compressed(stats)
            }
            Err(e) => {
                let error = e.to_string();
                tracing::warn!(path = %source.display(), %error, "compression failed");
                emit(ProcessEvent::FileFailed {
                    name,
                    error: error.clone(),
                });
                FileOutcome::Failed { error }
            }
        };
        report.record(source, outcome);
    }

    report
}

/// Result of a dry run for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Ready(CompressPlan),
    Missing,
    Unreadable { error: String },
}

/// Identify every input and report what compressing it would produce,
/// without decoding pixels or writing files.
pub fn check(inputs: &[PathBuf], options: &CompressOptions) -> Vec<(PathBuf, CheckOutcome)> {
    check_with_backend(&RustBackend::new(), inputs, options)
}

pub fn check_with_backend(
    backend: &impl ImageBackend,
    inputs: &[PathBuf],
    options: &CompressOptions,
) -> Vec<(PathBuf, CheckOutcome)> {
    inputs
        .iter()
        .map(|source| {
            let outcome = if !source.exists() {
                CheckOutcome::Missing
            } else {
                match preview_compress(backend, source, options) {
                    Ok(plan) => CheckOutcome::Ready(plan),
                    Err(e) => CheckOutcome::Unreadable {
                        error: e.to_string(),
                    },
                }
            };
            (source.clone(), outcome)
        })
        .collect()
}
