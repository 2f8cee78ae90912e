//! Error types for the PDF size splitter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF size splitter
#[derive(Error, Debug)]
pub enum Error {
    /// Source file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Source file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source bytes are not a valid PDF
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Encrypted documents are not supported
    #[error("PDF is encrypted: {}", .0.display())]
    Encrypted(PathBuf),

    /// A page has no usable geometry
    #[error("Invalid page {page}: {reason}")]
    InvalidPage { page: usize, reason: String },

    /// Directory creation or file write failure
    #[error("Failed to write {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying or serializing a bucket's pages failed
    #[error("Failed to encode {bucket}: {source}")]
    Encoding {
        bucket: String,
        #[source]
        source: lopdf::Error,
    },

    /// The export worker pool could not be started
    #[error("Failed to start export workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// The run was cancelled before all buckets were exported
    #[error("Operation cancelled")]
    Cancelled,
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source unreadable or unsupported
    Load,
    /// Source structurally invalid
    Parse,
    /// Output directory or file could not be written
    Filesystem,
    /// A bucket could not be copied or serialized
    Encoding,
    /// Stopped by the caller
    Cancelled,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound(_) | Error::Load { .. } | Error::Encrypted(_) => ErrorKind::Load,
            Error::Pdf(_) | Error::InvalidPage { .. } => ErrorKind::Parse,
            Error::Filesystem { .. } | Error::WorkerPool(_) => ErrorKind::Filesystem,
            Error::Encoding { .. } => ErrorKind::Encoding,
            Error::Cancelled => ErrorKind::Cancelled,
        }
    }
}
