//! CLI output formatting for compress and check runs.
//!
//! # Output Format
//!
//! ## Compress
//!
//! ```text
//! ============================================================
//! IMAGE COMPRESSION
//! ============================================================
//! [!] File not found: seu-joao.png
//!
//! [*] Processing: santa-rita.png
//!   Resized: 3000x2000 -> 1920x1280
//!   Original: 4.52 MB
//!   New:      0.61 MB
//!   Savings:  86.5%
//!
//! [*] Processing: notes.png
//!   [X] Error: Failed to decode notes.png: ...
//!
//! ============================================================
//! SUMMARY
//! ============================================================
//! Total original: 4.52 MB
//! Total new:      0.61 MB
//! Total savings:  86.5%
//! ```
//!
//! ## Check
//!
//! ```text
//! santa-rita.png: 3000x2000 -> 1920x1280 (santa-rita.jpg)
//! celia.png: 1000x800 (celia.jpg)
//! seu-joao.png: not found
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::imaging::{CompressionStats, Dimensions};
use crate::naming::display_name;
use crate::process::{BatchReport, CheckOutcome, ProcessEvent};
use std::path::PathBuf;

const RULE_WIDTH: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a byte count as megabytes with two decimals.
fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Format a savings percentage with one decimal.
fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// A titled block framed by rules.
fn heading(title: &str) -> Vec<String> {
    vec![rule(), title.to_string(), rule()]
}

fn dimension_change(from: Dimensions, to: Dimensions) -> String {
    if from == to {
        from.to_string()
    } else {
        format!("{} -> {}", from, to)
    }
}

// ============================================================================
// Compress output
// ============================================================================

/// Banner printed before a batch starts.
pub fn format_banner() -> Vec<String> {
    heading("IMAGE COMPRESSION")
}

fn stats_lines(stats: &CompressionStats) -> Vec<String> {
    let mut lines = Vec::new();
    if stats.resized() {
        lines.push(format!(
            "  Resized: {}",
            dimension_change(stats.source_dimensions, stats.output_dimensions)
        ));
    }
    lines.push(format!("  Original: {}", format_mb(stats.original_bytes)));
    lines.push(format!("  New:      {}", format_mb(stats.new_bytes)));
    lines.push(format!("  Savings:  {}", format_percent(stats.savings_percent)));
    lines
}

/// Format a single progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::FileMissing { name } => vec![format!("[!] File not found: {}", name)],
        ProcessEvent::FileStarted { name } => {
            vec![String::new(), format!("[*] Processing: {}", name)]
        }
        ProcessEvent::FileCompressed { stats, .. } => stats_lines(stats),
        ProcessEvent::FileFailed { error, .. } => vec![format!("  [X] Error: {}", error)],
    }
}

/// Format the totals block printed after a batch.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    let mut lines = vec![String::new()];
    lines.extend(heading("SUMMARY"));
    lines.push(format!(
        "Total original: {}",
        format_mb(report.total_original_bytes)
    ));
    lines.push(format!("Total new:      {}", format_mb(report.total_new_bytes)));
    lines.push(format!(
        "Total savings:  {}",
        format_percent(report.total_savings_percent())
    ));

    let (missing, failed) = (report.missing_count(), report.failed_count());
    if missing > 0 || failed > 0 {
        lines.push(format!(
            "Compressed {} of {} files ({} not found, {} failed)",
            report.compressed_count(),
            report.files.len(),
            missing,
            failed
        ));
    }
    if report.compressed_count() > 0 {
        lines.push(String::new());
        lines.push("[OK] JPEG files written. Update references to use the new extension.".into());
    }
    lines
}

/// Print the batch banner to stdout.
pub fn print_banner() {
    for line in format_banner() {
        println!("{}", line);
    }
}

/// Print the batch summary to stdout.
pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format dry-run results, one line per input.
pub fn format_check_output(results: &[(PathBuf, CheckOutcome)]) -> Vec<String> {
    results
        .iter()
        .map(|(source, outcome)| {
            let name = display_name(source);
            match outcome {
                CheckOutcome::Ready(plan) => format!(
                    "{}: {} ({})",
                    name,
                    dimension_change(plan.source_dimensions, plan.output_dimensions),
                    display_name(&plan.output_path)
                ),
                CheckOutcome::Missing => format!("{}: not found", name),
                CheckOutcome::Unreadable { error } => format!("{}: unreadable ({})", name, error),
            }
        })
        .collect()
}

/// Print dry-run results to stdout.
pub fn print_check_output(results: &[(PathBuf, CheckOutcome)]) {
    for line in format_check_output(results) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::CompressPlan;
    use crate::process::{FileOutcome, FileReport};

    fn stats(original: u64, new: u64, from: (u32, u32), to: (u32, u32)) -> CompressionStats {
        CompressionStats {
            output_path: "out.jpg".into(),
            original_bytes: original,
            new_bytes: new,
            savings_percent: crate::imaging::savings_percent(original, new),
            source_dimensions: from.into(),
            output_dimensions: to.into(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_mb_two_decimals() {
        assert_eq!(format_mb(0), "0.00 MB");
        assert_eq!(format_mb(1024 * 1024), "1.00 MB");
        assert_eq!(format_mb(1_572_864), "1.50 MB");
    }

    #[test]
    fn format_percent_one_decimal() {
        assert_eq!(format_percent(86.54), "86.5%");
        assert_eq!(format_percent(-12.0), "-12.0%");
    }

    #[test]
    fn banner_is_framed() {
        let lines = format_banner();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "=".repeat(60));
        assert_eq!(lines[1], "IMAGE COMPRESSION");
    }

    // =========================================================================
    // Process events
    // =========================================================================

    #[test]
    fn missing_event_line() {
        let lines = format_process_event(&ProcessEvent::FileMissing {
            name: "seu-joao.png".into(),
        });
        assert_eq!(lines, vec!["[!] File not found: seu-joao.png"]);
    }

    #[test]
    fn started_event_has_blank_separator() {
        let lines = format_process_event(&ProcessEvent::FileStarted {
            name: "celia.png".into(),
        });
        assert_eq!(lines, vec!["", "[*] Processing: celia.png"]);
    }

    #[test]
    fn compressed_event_with_resize() {
        let lines = format_process_event(&ProcessEvent::FileCompressed {
            name: "santa-rita.png".into(),
            stats: stats(4 * 1024 * 1024, 1024 * 1024, (3000, 2000), (1920, 1280)),
        });
        assert_eq!(
            lines,
            vec![
                "  Resized: 3000x2000 -> 1920x1280",
                "  Original: 4.00 MB",
                "  New:      1.00 MB",
                "  Savings:  75.0%",
            ]
        );
    }

    #[test]
    fn compressed_event_without_resize_has_no_resize_line() {
        let lines = format_process_event(&ProcessEvent::FileCompressed {
            name: "celia.png".into(),
            stats: stats(2048, 1024, (1000, 800), (1000, 800)),
        });
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| !l.contains("Resized")));
    }

    #[test]
    fn failed_event_carries_error() {
        let lines = format_process_event(&ProcessEvent::FileFailed {
            name: "notes.png".into(),
            error: "Failed to decode notes.png: bad".into(),
        });
        assert_eq!(lines, vec!["  [X] Error: Failed to decode notes.png: bad"]);
    }

    // =========================================================================
    // Summary
    // =========================================================================

    #[test]
    fn summary_totals() {
        let report = BatchReport {
            files: vec![FileReport {
                source: "a.png".into(),
                outcome: FileOutcome::Compressed(stats(2 * 1024 * 1024, 512 * 1024, (1, 1), (1, 1))),
            }],
            total_original_bytes: 2 * 1024 * 1024,
            total_new_bytes: 512 * 1024,
        };

        let lines = format_summary(&report);
        assert!(lines.contains(&"Total original: 2.00 MB".to_string()));
        assert!(lines.contains(&"Total new:      0.50 MB".to_string()));
        assert!(lines.contains(&"Total savings:  75.0%".to_string()));
        assert!(lines.iter().all(|l| !l.starts_with("Compressed ")));
    }

    #[test]
    fn summary_mentions_skipped_files() {
        let report = BatchReport {
            files: vec![
                FileReport {
                    source: "gone.png".into(),
                    outcome: FileOutcome::Missing,
                },
                FileReport {
                    source: "bad.png".into(),
                    outcome: FileOutcome::Failed {
                        error: "x".into(),
                    },
                },
            ],
            total_original_bytes: 0,
            total_new_bytes: 0,
        };

        let lines = format_summary(&report);
        assert!(lines.contains(&"Total savings:  0.0%".to_string()));
        assert!(lines.contains(&"Compressed 0 of 2 files (1 not found, 1 failed)".to_string()));
        assert!(lines.iter().all(|l| !l.starts_with("[OK]")));
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_lines() {
        let results = vec![
            (
                PathBuf::from("deck/santa-rita.png"),
                CheckOutcome::Ready(CompressPlan {
                    output_path: "deck/santa-rita.jpg".into(),
                    source_dimensions: (3000, 2000).into(),
                    output_dimensions: (1920, 1280).into(),
                }),
            ),
            (
                PathBuf::from("deck/celia.png"),
                CheckOutcome::Ready(CompressPlan {
                    output_path: "deck/celia.jpg".into(),
                    source_dimensions: (1000, 800).into(),
                    output_dimensions: (1000, 800).into(),
                }),
            ),
            (PathBuf::from("deck/seu-joao.png"), CheckOutcome::Missing),
        ];

        assert_eq!(
            format_check_output(&results),
            vec![
                "santa-rita.png: 3000x2000 -> 1920x1280 (santa-rita.jpg)",
                "celia.png: 1000x800 (celia.jpg)",
                "seu-joao.png: not found",
            ]
        );
    }
}
