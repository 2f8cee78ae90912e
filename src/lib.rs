//! PDF Size Splitter Library
//!
//! Splits a PDF into several PDFs, one per kind of sheet. Every page is
//! sorted by:
//! - paper class (`A4` or `A3`, from the shorter side)
//! - orientation (`Portrait` or `Landscape`)
//! - a `Long` flag for elongated sheets
//!
//! and each group is written to
//! `{output_root}/{name}/{name}_{category}.pdf`, pages in original order.
//!
//! # Example
//!
//! ```no_run
//! use pdf_sizesplit::error_log::FileErrorLog;
//! use pdf_sizesplit::split::{split_pdf, SplitRequest};
//!
//! let request = SplitRequest::new("/scans/site plans.pdf", "output");
//! let log = FileErrorLog::new("logs/error.log");
//!
//! let outcome = split_pdf(&request, |p| eprintln!("{:.0}%", p * 100.0), &log);
//! println!("{}", outcome.message());
//! ```

pub mod classify;
pub mod error;
pub mod error_log;
pub mod pdf;
pub mod sanitize;
pub mod split;

// Re-export commonly used items
pub use classify::{classify, CategoryLabel};
pub use error::{Error, ErrorKind, Result};
pub use split::{split_pdf, Outcome, SplitRequest};
