//! One complete run: load, sort pages into buckets, export
//!
//! [`split_pdf`] is the error boundary of the library. Whatever happens
//! inside, the caller gets a single [`Outcome`] with a message fit for
//! showing to a user, and failures are handed to an [`ErrorLog`].

use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::error_log::ErrorLog;
use crate::pdf::{bucketize, export, output_dir, ExportOptions, SourceDocument};

/// What to split and where to put the results
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Source PDF
    pub input: PathBuf,
    /// Root directory; output goes to `{output_root}/{sanitized name}/`
    pub output_root: PathBuf,
    pub export: ExportOptions,
}

impl SplitRequest {
    pub fn new(input: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_root: output_root.into(),
            export: ExportOptions::default(),
        }
    }
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        message: String,
        output_dir: PathBuf,
        files: Vec<PathBuf>,
    },
    Failure {
        message: String,
    },
    Cancelled {
        message: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. }
            | Outcome::Failure { message }
            | Outcome::Cancelled { message } => message,
        }
    }
}

/// Split `request.input` into one PDF per page category
///
/// `progress` receives one value per source page (see [`bucketize`]).
/// Nothing is retried; to try again, call this again.
pub fn split_pdf<F>(request: &SplitRequest, progress: F, error_log: &dyn ErrorLog) -> Outcome
where
    F: FnMut(f64),
{
    match run(request, progress) {
        Ok((output_dir, files)) => {
            log::info!(
                "Split {} into {} files",
                request.input.display(),
                files.len()
            );
            Outcome::Success {
                message: format!(
                    "All PDFs have been successfully created in {}.",
                    output_dir.display()
                ),
                output_dir,
                files,
            }
        }
        Err(Error::Cancelled) => {
            log::warn!("Split of {} cancelled", request.input.display());
            Outcome::Cancelled {
                message: "Splitting was cancelled before all PDFs were created.".to_string(),
            }
        }
        Err(e) => {
            log::error!("Failed to split {}: {}", request.input.display(), e);
            error_log.record(&format!("Splitting PDF: {}", file_label(&request.input)), &e);
            Outcome::Failure {
                message: format!("Failed to split PDF: {}", e),
            }
        }
    }
}

fn run<F>(request: &SplitRequest, progress: F) -> Result<(PathBuf, Vec<PathBuf>)>
where
    F: FnMut(f64),
{
    let source = SourceDocument::open(&request.input)?;
    let buckets = bucketize(&source, &source.name, progress)?;
    let files = export(&source, &buckets, &request.output_root, &request.export)?;
    Ok((output_dir(&request.output_root, &source), files))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
