//! Synthesized PDFs for integration tests

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::Path;

/// Kids per intermediate `Pages` node
const PAGES_PER_NODE: usize = 10;

/// Build a PDF with one page per `(width, height)`, each showing "Page N"
///
/// Pages hang off intermediate `Pages` nodes and inherit their font
/// resources from the tree root, the way larger producers lay files out.
pub fn build_pdf(sizes: &[(i64, i64)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let root_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources = Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]);

    let mut nodes: Vec<Object> = Vec::new();
    for (chunk_index, chunk) in sizes.chunks(PAGES_PER_NODE).enumerate() {
        let node_id = doc.new_object_id();
        let kids: Vec<Object> = chunk
            .iter()
            .enumerate()
            .map(|(offset, &size)| {
                let number = chunk_index * PAGES_PER_NODE + offset + 1;
                Object::Reference(add_page(&mut doc, node_id, number, size))
            })
            .collect();

        doc.objects.insert(
            node_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Parent", Object::Reference(root_id)),
                ("Count", Object::Integer(kids.len() as i64)),
                ("Kids", Object::Array(kids)),
            ])),
        );
        nodes.push(Object::Reference(node_id));
    }

    doc.objects.insert(
        root_id,
        Object::Dictionary(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(sizes.len() as i64)),
            ("Kids", Object::Array(nodes)),
            ("Resources", Object::Dictionary(resources)),
        ])),
    );

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(root_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn add_page(doc: &mut Document, parent: ObjectId, number: usize, (width, height): (i64, i64)) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(40), Object::Integer(40)]),
            Operation::new(
                "Tj",
                vec![Object::String(format!("Page {}", number).into_bytes(), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(parent)),
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
    ]))
}

/// Write a synthesized PDF to `path`
pub fn write_pdf(path: &Path, sizes: &[(i64, i64)]) {
    std::fs::write(path, build_pdf(sizes)).expect("Failed to write test PDF");
}

/// Text drawn on each page of a PDF, in page order
pub fn page_texts(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load output PDF");
    doc.get_pages()
        .into_values()
        .map(|id| String::from_utf8_lossy(&doc.get_page_content(id).unwrap()).into_owned())
        .collect()
}

/// Whether every page of a PDF has its own font resources
pub fn pages_have_fonts(path: &Path) -> bool {
    let doc = Document::load(path).expect("Failed to load output PDF");
    doc.get_pages().into_values().all(|id| {
        let page = doc.get_dictionary(id).unwrap();
        let resources = match page.get(b"Resources") {
            Ok(Object::Reference(res_id)) => doc.get_dictionary(*res_id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };
        resources.is_some_and(|dict| dict.has(b"Font"))
    })
}
