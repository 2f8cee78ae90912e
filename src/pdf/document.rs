//! Source document loading, page geometry and page subsets

use std::path::{Path, PathBuf};
use lopdf::{Document, Object, ObjectId};
use crate::classify::{classify, CategoryLabel};
use crate::error::{Error, Result};
use crate::sanitize::sanitize_file_name;

/// Guard against cyclic `Parent` chains when looking up inherited attributes
const MAX_TREE_DEPTH: usize = 64;

/// Width and height of a page in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn category(&self) -> CategoryLabel {
        classify(self.width, self.height)
    }
}

/// A loaded, read-only source PDF
///
/// Keeps the original bytes next to the parsed document so export workers
/// can parse private copies instead of sharing one `Document`.
pub struct SourceDocument {
    /// Path the document was read from
    pub path: PathBuf,
    /// Sanitized file stem, used for the output directory and bucket keys
    pub name: String,
    bytes: Vec<u8>,
    doc: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Read and parse a PDF file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(path, bytes)
    }

    /// Parse a PDF from memory; `path` only supplies the name
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> Result<Self> {
        let doc = Document::load_mem(&bytes)?;

        if doc.is_encrypted() {
            return Err(Error::Encrypted(path.to_path_buf()));
        }

        let page_ids = doc.get_pages().into_values().collect();

        log::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());

        Ok(Self {
            path: path.to_path_buf(),
            name: sanitize_file_name(path),
            bytes,
            doc,
            page_ids,
        })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Size of the page at a zero-based index
    pub fn page_size(&self, index: usize) -> Result<PageSize> {
        let page_id = *self.page_ids.get(index).ok_or_else(|| Error::InvalidPage {
            page: index,
            reason: format!("out of range (document has {} pages)", self.page_count()),
        })?;

        page_size(&self.doc, page_id).map_err(|reason| Error::InvalidPage { page: index, reason })
    }
}

/// Size of a page from its effective MediaBox
///
/// The MediaBox may sit on the page itself or be inherited from any
/// ancestor `Pages` node. `/Rotate` is not applied.
pub fn page_size(doc: &Document, page_id: ObjectId) -> std::result::Result<PageSize, String> {
    let rect = media_box(doc, page_id)?;

    let width = (rect[2] - rect[0]).abs();
    let height = (rect[3] - rect[1]).abs();

    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(format!("unusable page size {} x {}", width, height));
    }

    Ok(PageSize { width, height })
}

fn media_box(doc: &Document, page_id: ObjectId) -> std::result::Result<[f64; 4], String> {
    match inherited(doc, page_id, b"MediaBox")? {
        Some(value) => parse_rectangle(doc, value),
        None => Err("no MediaBox".to_string()),
    }
}

/// Look up a page attribute on the page or its nearest ancestor that has it
fn inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> std::result::Result<Option<&'a Object>, String> {
    let mut node = doc
        .get_dictionary(page_id)
        .map_err(|e| format!("page object unreadable: {}", e))?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value));
        }

        let parent = match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        node = doc
            .get_dictionary(parent)
            .map_err(|e| format!("page tree node unreadable: {}", e))?;
    }

    Err("page tree too deep".to_string())
}

fn parse_rectangle(doc: &Document, value: &Object) -> std::result::Result<[f64; 4], String> {
    let items = resolve(doc, value)
        .as_array()
        .map_err(|_| "MediaBox is not an array".to_string())?;

    if items.len() != 4 {
        return Err(format!("MediaBox has {} entries", items.len()));
    }

    let mut rect = [0.0; 4];
    for (slot, item) in rect.iter_mut().zip(items) {
        *slot = as_number(resolve(doc, item)).ok_or("MediaBox entry is not a number")?;
    }
    Ok(rect)
}

fn resolve<'a>(doc: &'a Document, value: &'a Object) -> &'a Object {
    match value {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(value),
        _ => value,
    }
}

fn as_number(value: &Object) -> Option<f64> {
    match value {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Attributes a page may inherit from its ancestors in the page tree
const INHERITED_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Copy of `doc` that holds only the pages at `indices` (zero-based)
///
/// The page tree is rebuilt as a single root `Pages` node whose kids are the
/// selected pages in source order. Inherited attributes are copied onto each
/// page first, so nothing is lost when intermediate nodes go away. Nothing
/// else on a page changes, so content and annotations, link destinations
/// included, stay as they were. Unreferenced objects are then
/// dropped and uncompressed streams are deflated, both lossless.
pub fn extract_pages(doc: &Document, indices: &[usize]) -> lopdf::Result<Document> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let kept: Vec<ObjectId> = indices
        .iter()
        .filter_map(|&index| page_ids.get(index).copied())
        .collect();

    let mut extracted = doc.clone();
    let root_id = extracted.catalog()?.get(b"Pages")?.as_reference()?;

    for &page_id in &kept {
        let attributes: Vec<(&[u8], Object)> = INHERITED_KEYS
            .iter()
            .filter_map(|&key| {
                inherited(doc, page_id, key)
                    .ok()
                    .flatten()
                    .map(|value| (key, value.clone()))
            })
            .collect();

        let page = extracted.get_dictionary_mut(page_id)?;
        for (key, value) in attributes {
            page.set(key, value);
        }
        page.set("Parent", Object::Reference(root_id));
    }

    let root = extracted.get_dictionary_mut(root_id)?;
    root.set(
        "Kids",
        Object::Array(kept.iter().map(|&id| Object::Reference(id)).collect()),
    );
    root.set("Count", Object::Integer(kept.len() as i64));

    extracted.prune_objects();
    extracted.compress();
    Ok(extracted)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::{Dictionary, Document, Object, Stream};

    /// Bare page tree, one page per `(width, height)`; page N draws "(Page N)"
    pub fn build_document(sizes: &[(i64, i64)]) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(width, height))| {
                let content = format!("BT (Page {}) Tj ET", i + 1).into_bytes();
                let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
                let page_id = doc.add_object(Dictionary::from_iter(vec![
                    ("Type", Object::Name(b"Page".to_vec())),
                    ("Parent", Object::Reference(pages_id)),
                    (
                        "MediaBox",
                        Object::Array(vec![
                            Object::Integer(0),
                            Object::Integer(0),
                            Object::Integer(width),
                            Object::Integer(height),
                        ]),
                    ),
                    ("Contents", Object::Reference(content_id)),
                ]));
                Object::Reference(page_id)
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Count", Object::Integer(kids.len() as i64)),
                ("Kids", Object::Array(kids)),
            ])),
        );

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc
    }

    pub fn to_bytes(mut doc: Document) -> Vec<u8> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    pub fn build_pdf(sizes: &[(i64, i64)]) -> Vec<u8> {
        to_bytes(build_document(sizes))
    }

    /// Pages without their own MediaBox; 842 x 1191 is set on the tree root
    pub fn build_inherited_pdf(page_count: usize) -> Vec<u8> {
        let mut doc = build_document(&vec![(842, 1191); page_count]);
        let root_id = doc.catalog().unwrap().get(b"Pages").unwrap().as_reference().unwrap();

        let mut media_box = None;
        for page_id in doc.get_pages().into_values() {
            media_box = doc.get_dictionary_mut(page_id).unwrap().remove(b"MediaBox");
        }
        if let Some(media_box) = media_box {
            doc.get_dictionary_mut(root_id).unwrap().set("MediaBox", media_box);
        }
        to_bytes(doc)
    }

    /// Single page document whose trailer carries an `/Encrypt` dictionary
    pub fn build_encrypted_pdf() -> Vec<u8> {
        let mut doc = build_document(&[(595, 842)]);
        let encrypt_id = doc.add_object(Dictionary::from_iter(vec![
            ("Filter", Object::Name(b"Standard".to_vec())),
            ("V", Object::Integer(1)),
            ("R", Object::Integer(2)),
            ("O", Object::string_literal(vec![0u8; 32])),
            ("U", Object::string_literal(vec![0u8; 32])),
            ("P", Object::Integer(-4)),
        ]));
        doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
        to_bytes(doc)
    }
}
