//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use pdfs_to_pdf::notice::Notice;
use pdfs_to_pdf::ui::{Dialogs, OpenRequest, SaveRequest};

/// Write a PDF whose pages show "<label>-<n>"
pub fn write_pdf(dir: &Path, label: &str, page_count: usize) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids = Vec::new();
    for n in 1..=page_count {
        let content = format!("BT /F1 18 Tf 50 700 Td ({label}-{n}) Tj ET");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count as i64),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(format!("{label}.pdf"));
    doc.save(&path).expect("Failed to write test PDF");
    path
}

/// Page labels of a PDF, in page order
pub fn page_labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).expect("Page has no content");
            let text = String::from_utf8_lossy(&content).into_owned();
            let start = text.find('(').expect("No text on page") + 1;
            let end = text[start..].find(')').expect("Unterminated text") + start;
            text[start..end].to_string()
        })
        .collect()
}

/// Dialogs answered from queues, recording every notice
#[derive(Default)]
pub struct ScriptedDialogs {
    pub opens: VecDeque<Vec<PathBuf>>,
    pub saves: VecDeque<PathBuf>,
    pub notices: Vec<Notice>,
}

impl Dialogs for ScriptedDialogs {
    fn open_files(&mut self, _request: &OpenRequest) -> Vec<PathBuf> {
        self.opens.pop_front().unwrap_or_default()
    }

    fn save_file(&mut self, _request: &SaveRequest) -> Option<PathBuf> {
        self.saves.pop_front()
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
