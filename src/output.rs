//! CLI output formatting for batch runs.
//!
//! # Output Format
//!
//! ```text
//! photos/dawn.jpg → photos/dawn.slim.jpg  2.31 MB → 940.12 KB (60.3% saved)
//! photos/icon.png  623 B (kept original)
//! photos/broken.jpg  ERROR: read failed: permission denied
//!
//! Optimized 1 of 3 files  2.31 MB → 940.73 KB (60.2% saved)
//! 1 files had errors
//! ```
//!
//! # Architecture
//!
//! Each piece of output has a `format_*` function (pure, returns strings) and
//! a `print_*` wrapper that writes to stdout or stderr. Format functions do
//! no I/O so tests assert on exact lines.

use crate::batch::{BatchSummary, FileReport};

/// Human-readable byte count: `623 B`, `1.50 KB`, `2.31 MB`.
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        let mb = bytes as f64 / MB as f64;
        format!("{mb:.2} MB")
    } else if bytes >= KB {
        let kb = bytes as f64 / KB as f64;
        format!("{kb:.2} KB")
    } else {
        format!("{bytes} B")
    }
}

fn total_percent(summary: &BatchSummary) -> f64 {
    let original = summary.total_original();
    if original == 0 {
        return 0.0;
    }
    let saved = original.saturating_sub(summary.total_output());
    saved as f64 / original as f64 * 100.0
}

/// Format one file's outcome as a single line.
pub fn format_file_line(report: &FileReport) -> String {
    if let Some(error) = &report.error {
        return format!("{}  ERROR: {}", report.path.display(), error);
    }
    if report.success {
        format!(
            "{} \u{2192} {}  {} \u{2192} {} ({:.1}% saved)",
            report.path.display(),
            report.output_path.display(),
            format_size(report.original_size),
            format_size(report.output_size),
            report.saved_percent()
        )
    } else {
        format!(
            "{}  {} (kept original)",
            report.path.display(),
            format_size(report.original_size)
        )
    }
}

/// Format the totals block shown after a batch.
pub fn format_summary(summary: &BatchSummary) -> Vec<String> {
    if summary.reports.is_empty() {
        return vec!["No images found.".to_string()];
    }

    let mut lines = vec![format!(
        "Optimized {} of {} files  {} \u{2192} {} ({:.1}% saved)",
        summary.compressed_count(),
        summary.reports.len(),
        format_size(summary.total_original()),
        format_size(summary.total_output()),
        total_percent(summary)
    )];
    if summary.has_errors() {
        lines.push(format!("{} files had errors", summary.error_count()));
    }
    lines
}

/// Print every per-file line to stdout.
pub fn print_reports(summary: &BatchSummary) {
    for report in &summary.reports {
        println!("{}", format_file_line(report));
    }
}

/// Print the totals block to stdout, separated from the per-file lines.
pub fn print_summary(summary: &BatchSummary) {
    if !summary.reports.is_empty() {
        println!();
    }
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

/// Print only the error lines, to stderr. Used by `--quiet`.
pub fn print_errors(summary: &BatchSummary) {
    for report in summary.reports.iter().filter(|r| r.error.is_some()) {
        eprintln!("{}", format_file_line(report));
    }
}
