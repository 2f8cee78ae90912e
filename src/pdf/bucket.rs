//! Grouping pages into per-category buckets

use std::collections::btree_map::{self, BTreeMap};
use crate::error::Result;
use crate::pdf::document::SourceDocument;

/// Pages grouped by bucket key (`{name}_{category}`)
///
/// Page indices inside a bucket are zero-based and strictly ascending.
/// Together the buckets hold every page of the source exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    inner: BTreeMap<String, Vec<usize>>,
}

impl Buckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page to a bucket, creating the bucket on first use
    ///
    /// Pages must be pushed in increasing index order.
    pub fn push(&mut self, key: String, page: usize) {
        let pages = self.inner.entry(key).or_default();
        debug_assert!(pages.last().map_or(true, |&last| last < page));
        pages.push(page);
    }

    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Total number of pages across all buckets
    pub fn page_count(&self) -> usize {
        self.inner.values().map(Vec::len).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.inner.iter() }
    }
}

/// Iterator over `(key, pages)` in key order
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, Vec<usize>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [usize]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, pages)| (key.as_str(), pages.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Buckets {
    type Item = (&'a str, &'a [usize]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Classify every page of `source` and group the indices by bucket key
///
/// Pages are visited once, front to back. `progress` is called once per page
/// with `(i + 1) / total`, so values strictly increase and the last one is
/// exactly `1.0`. An empty document gives empty buckets and no calls.
pub fn bucketize<F>(source: &SourceDocument, name: &str, mut progress: F) -> Result<Buckets>
where
    F: FnMut(f64),
{
    let total = source.page_count();
    let mut buckets = Buckets::new();

    for index in 0..total {
        let category = source.page_size(index)?.category();
        buckets.push(format!("{}_{}", name, category), index);

        progress((index + 1) as f64 / total as f64);
    }

    log::debug!(
        "Sorted {} pages of {} into {} buckets",
        total,
        source.path.display(),
        buckets.len()
    );

    Ok(buckets)
}
