//! Writing one PDF per bucket

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use lopdf::Document;
use rayon::prelude::*;
use crate::error::{Error, Result};
use crate::pdf::bucket::Buckets;
use crate::pdf::document::{extract_pages, SourceDocument};

/// Shared flag for stopping an export between buckets
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options for exporting buckets
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Maximum number of buckets written at once; 0 or 1 means sequential
    pub jobs: usize,
    /// Checked before each bucket starts
    pub cancel: Option<CancelFlag>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { jobs: 1, cancel: None }
    }
}

impl ExportOptions {
    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.is_cancelled() => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Directory that receives the files for `source`
pub fn output_dir(output_root: &Path, source: &SourceDocument) -> PathBuf {
    output_root.join(&source.name)
}

/// Write every bucket to `{output_root}/{name}/{key}.pdf`
///
/// The output directory is created if needed. Existing files with the same
/// name are overwritten. The first failing bucket stops the export and its
/// error is returned; files written before that stay on disk.
///
/// Returns the written paths in bucket key order.
pub fn export(
    source: &SourceDocument,
    buckets: &Buckets,
    output_root: &Path,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    let dir = output_dir(output_root, source);
    std::fs::create_dir_all(&dir).map_err(|e| Error::Filesystem {
        path: dir.clone(),
        source: e,
    })?;

    if options.jobs <= 1 || buckets.len() <= 1 {
        return buckets
            .iter()
            .map(|(key, pages)| {
                options.check_cancelled()?;
                write_bucket(source.document(), &dir, key, pages)
            })
            .collect();
    }

    export_parallel(source, buckets, &dir, options)
}

/// Parallel export on a pool of `options.jobs` threads
///
/// Each bucket parses its own copy of the source bytes, so workers never
/// share a `Document`.
fn export_parallel(
    source: &SourceDocument,
    buckets: &Buckets,
    dir: &Path,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()?;

    log::debug!("Exporting {} buckets on {} workers", buckets.len(), options.jobs);

    let entries: Vec<(&str, &[usize])> = buckets.iter().collect();
    let bytes = source.bytes();

    pool.install(|| {
        entries
            .par_iter()
            .map(|&(key, pages)| {
                options.check_cancelled()?;
                let doc = Document::load_mem(bytes).map_err(|e| Error::Encoding {
                    bucket: key.to_string(),
                    source: e,
                })?;
                write_bucket(&doc, dir, key, pages)
            })
            .collect()
    })
}

fn write_bucket(doc: &Document, dir: &Path, key: &str, pages: &[usize]) -> Result<PathBuf> {
    let mut extracted = extract_pages(doc, pages).map_err(|e| Error::Encoding {
        bucket: key.to_string(),
        source: e,
    })?;

    let mut bytes = Vec::new();
    extracted
        .save_to(&mut bytes)
        .map_err(|e| Error::Encoding {
            bucket: key.to_string(),
            source: lopdf::Error::from(e),
        })?;

    let path = dir.join(format!("{}.pdf", key));
    std::fs::write(&path, &bytes).map_err(|e| Error::Filesystem {
        path: path.clone(),
        source: e,
    })?;

    log::info!("Wrote {} ({} pages)", path.display(), pages.len());
    Ok(path)
}
