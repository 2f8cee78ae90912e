//! PDF handling: loading, bucketing and export

pub mod bucket;
pub mod document;
pub mod export;

// Re-export commonly used items
pub use bucket::{bucketize, Buckets};
pub use document::{extract_pages, page_size, PageSize, SourceDocument};
pub use export::{export, output_dir, CancelFlag, ExportOptions};
