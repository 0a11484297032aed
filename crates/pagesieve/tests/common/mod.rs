//! Shared fixture builder: minimal real PDFs assembled with lopdf.

#![allow(dead_code)]

use std::path::Path;

use lopdf::{Object, Stream, dictionary};

/// Build a PDF with one page per entry in `texts` and write it to
/// `dir/name`. Each page carries a single Helvetica text run.
pub fn write_pdf(dir: &Path, name: &str, texts: &[&str]) {
    let mut doc = lopdf::Document::with_version("1.5");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources = dictionary! {
        "Font" => dictionary! { "F1" => Object::Reference(font_id) },
    };

    let mut kids = Vec::new();
    for text in texts {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
            "Contents" => Object::Reference(content_id),
            "Resources" => resources.clone(),
        });
        kids.push(page_id);
    }

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
        "Count" => Object::Integer(kids.len() as i64),
    });
    for page_id in kids {
        if let Ok(dict) = doc.get_object_mut(page_id).and_then(|o| o.as_dict_mut()) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.save(dir.join(name)).unwrap();
}

/// Extract the text of every page of a saved PDF, in page order.
pub fn page_texts(path: &Path) -> Vec<String> {
    let doc = lopdf::Document::load(path).unwrap();
    let count = doc.get_pages().len() as u32;
    (1..=count)
        .map(|n| doc.extract_text(&[n]).unwrap())
        .collect()
}
