//! Batch optimization of files on disk.
//!
//! The CLI front half: collect candidate files from path arguments, run each
//! one through [`crate::optimize::optimize`] on a rayon pool, and write the
//! winning bytes next to (or instead of) the input. All per-file failures are
//! captured in the report instead of aborting the batch.

use crate::format::mime_for_path;
use crate::optimize::optimize;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Per-run knobs, straight from the CLI flags.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub convert_to_webp: bool,
    pub ceiling: Option<usize>,
    pub out_dir: Option<PathBuf>,
}

/// What happened to one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub output_path: PathBuf,
    pub original_size: usize,
    pub output_size: usize,
    /// True when the written bytes are a genuine compression of the input.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn failed(path: &Path, output_path: PathBuf, error: String) -> Self {
        Self {
            path: path.to_path_buf(),
            output_path,
            original_size: 0,
            output_size: 0,
            success: false,
            error: Some(error),
        }
    }

    /// Bytes saved relative to the original, as a percentage.
    pub fn saved_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let saved = self.original_size.saturating_sub(self.output_size);
        saved as f64 / self.original_size as f64 * 100.0
    }
}

/// Everything a finished batch knows about itself.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn total_original(&self) -> usize {
        self.reports.iter().map(|r| r.original_size).sum()
    }

    pub fn total_output(&self) -> usize {
        self.reports.iter().map(|r| r.output_size).sum()
    }

    /// Files where a genuinely smaller candidate was written.
    pub fn compressed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.success).count()
    }

    pub fn error_count(&self) -> usize {
        self.reports.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Resolve the effective worker count from `--jobs`.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_jobs(jobs: Option<usize>) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    jobs.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Expand path arguments into the sorted list of files to optimize.
///
/// Directories are walked recursively; only files whose extension maps to a
/// recognized MIME type are kept (case-insensitive, so `PHOTO.PNG` counts).
/// An explicitly named file with an unrecognized extension is skipped with a
/// warning rather than treated as an error.
pub fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(BatchError::PathNotFound(path.clone()));
        }
        if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = entry?;
                if entry.file_type().is_file() && mime_for_path(entry.path()).is_some() {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else if mime_for_path(path).is_some() {
            files.push(path.clone());
        } else {
            warn!(path = %path.display(), "skipping file with unrecognized extension");
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Compute where the optimized bytes for `input` go.
///
/// Without `--out-dir` the result lands next to the input with a `.slim`
/// suffix before the extension (`photo.jpg` → `photo.slim.jpg`). With an
/// output directory the filename is kept as-is. Conversion to WebP swaps the
/// extension either way.
pub fn output_path(input: &Path, out_dir: Option<&Path>, convert_to_webp: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = if convert_to_webp {
        "webp"
    } else {
        input.extension().and_then(|e| e.to_str()).unwrap_or("bin")
    };

    match out_dir {
        Some(dir) => dir.join(format!("{}.{}", stem, ext)),
        None => input.with_file_name(format!("{}.slim.{}", stem, ext)),
    }
}

/// Optimize a single file on disk and write the result.
///
/// Never returns an error: read and write failures land in the report's
/// `error` field so the batch keeps going. When the destination equals the
/// source (an `--out-dir` pointing back at the input) and nothing improved,
/// the source is left untouched.
pub fn optimize_file(path: &Path, options: &BatchOptions) -> FileReport {
    let destination = output_path(path, options.out_dir.as_deref(), options.convert_to_webp);

    let Some(mime) = mime_for_path(path) else {
        return FileReport::failed(path, destination, "unrecognized extension".to_string());
    };

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileReport::failed(path, destination, format!("read failed: {}", e)),
    };

    let result = optimize(&bytes, mime, options.convert_to_webp, options.ceiling);

    let in_place = destination == path;
    if !(in_place && !result.success) {
        if let Some(parent) = destination.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return FileReport::failed(path, destination, format!("write failed: {}", e));
            }
        }
        if let Err(e) = fs::write(&destination, &result.bytes) {
            return FileReport::failed(path, destination, format!("write failed: {}", e));
        }
    }

    FileReport {
        path: path.to_path_buf(),
        output_path: destination,
        original_size: bytes.len(),
        output_size: result.bytes.len(),
        success: result.success,
        error: None,
    }
}

/// Collect, optimize in parallel, and summarize.
///
/// Report order matches the sorted file order regardless of which worker
/// finishes first.
pub fn run_batch(paths: &[PathBuf], options: &BatchOptions) -> Result<BatchSummary, BatchError> {
    let files = collect_files(paths)?;
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| optimize_file(path, options))
        .collect();
    Ok(BatchSummary { reports })
}
