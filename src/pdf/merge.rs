//! PDF merging functionality using lopdf
//!
//! [`PdfMerger`] is the only place that touches PDF bytes. The rest of the
//! crate talks to it through [`MergeEngine`]: register sources, set a
//! destination, merge.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, info, warn};
use crate::error::{Error, Result};

/// Lowest PDF version written for a merged document
const MIN_VERSION: &str = "1.5";

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic Parent chains in broken files
const MAX_TREE_DEPTH: usize = 64;

/// Where intermediate output is held while a merge runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryUsage {
    /// Serialize the whole merged document into memory, then write it in one go
    #[default]
    MainMemoryOnly,
    /// Serialize straight into the destination file
    Streamed,
}

/// What a finished merge produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of source documents merged
    pub sources: usize,
    /// Number of pages in the output
    pub pages: usize,
    /// Path the output was written to
    pub output: PathBuf,
}

/// Capability to combine several PDF files into one
pub trait MergeEngine {
    /// Set the file the combined document is written to
    fn set_destination(&mut self, path: &Path);

    /// Register one input file. Fails with [`Error::SourceNotFound`] when the
    /// file cannot be opened; the source is then not registered.
    fn add_source(&mut self, path: &Path) -> Result<()>;

    /// Combine every registered source, in registration order, into the destination
    fn merge_documents(&mut self, memory: MemoryUsage) -> Result<MergeSummary>;
}

/// [`MergeEngine`] backed by lopdf
///
/// Sources are only checked when added; they are loaded when the merge runs,
/// so no file handle outlives a call.
#[derive(Debug, Default)]
pub struct PdfMerger {
    sources: Vec<PathBuf>,
    destination: Option<PathBuf>,
}

impl PdfMerger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MergeEngine for PdfMerger {
    fn set_destination(&mut self, path: &Path) {
        self.destination = Some(path.to_path_buf());
    }

    fn add_source(&mut self, path: &Path) -> Result<()> {
        match File::open(path) {
            Ok(_) if path.is_file() => {
                debug!("Registered source {}", path.display());
                self.sources.push(path.to_path_buf());
                Ok(())
            }
            Ok(_) => Err(Error::SourceNotFound(path.to_path_buf())),
            Err(e) => {
                debug!("Cannot open {}: {}", path.display(), e);
                Err(Error::SourceNotFound(path.to_path_buf()))
            }
        }
    }

    fn merge_documents(&mut self, memory: MemoryUsage) -> Result<MergeSummary> {
        let destination = self.destination.clone().ok_or(Error::NoDestination)?;

        if self.sources.is_empty() {
            return Err(Error::General("No input files provided".to_string()));
        }

        let mut documents = Vec::with_capacity(self.sources.len());
        for path in &self.sources {
            debug!("Loading {}", path.display());
            documents.push(Document::load(path)?);
        }

        let (mut merged, pages) = combine_documents(documents)?;
        write_document(&mut merged, &destination, memory)?;

        info!(
            "Merged {} sources ({} pages) into {}",
            self.sources.len(),
            pages,
            destination.display()
        );

        Ok(MergeSummary {
            sources: self.sources.len(),
            pages,
            output: destination,
        })
    }
}

/// Combine loaded documents into one, pages in input order
///
/// Based on the lopdf merge example:
/// https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs
///
/// Returns the merged document and its page count.
pub fn combine_documents(documents: Vec<Document>) -> Result<(Document, usize)> {
    let version = documents
        .iter()
        .map(|doc| doc.version.as_str())
        .fold(MIN_VERSION, |highest, v| if v > highest { v } else { highest })
        .to_string();

    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
        if pages.is_empty() {
            warn!("Source document has no pages");
        }

        // Pages get a new parent below, so pull down what they inherit first
        for &page_id in &pages {
            flatten_inherited_attributes(&mut doc, page_id)?;
        }
        page_ids.extend(pages);

        // The old document structure is replaced by the new catalog and page tree
        objects.extend(doc.objects.into_iter().filter(|(_, object)| !is_structural(object)));
    }

    let mut merged_doc = Document::with_version(version);
    merged_doc.objects.extend(objects);

    // new_object_id() must hand out IDs above everything just inserted
    merged_doc.max_id = max_id - 1;

    let pages_id = merged_doc.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let catalog_id = merged_doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged_doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));
    merged_doc.trailer.set("Root", Object::Reference(catalog_id));

    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = merged_doc.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    Ok((merged_doc, page_ids.len()))
}

/// Copy inheritable attributes from the page tree onto the page itself
fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc.get_dictionary(page_id)?;
    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();

    let mut inherited: Vec<(&[u8], Object)> = Vec::new();
    let mut depth = 0;
    while let Some(node_id) = parent {
        if missing.is_empty() || depth >= MAX_TREE_DEPTH {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                inherited.push((*key, value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
        depth += 1;
    }

    if !inherited.is_empty() {
        let page = doc.get_dictionary_mut(page_id)?;
        for (key, value) in inherited {
            page.set(key, value);
        }
    }

    Ok(())
}

/// Document-level objects that do not survive into the merged document
fn is_structural(object: &Object) -> bool {
    let Object::Dictionary(dict) = object else {
        return false;
    };
    matches!(
        dict.get(b"Type").and_then(Object::as_name),
        Ok(b"Catalog" | b"Pages" | b"Outlines" | b"Outline")
    )
}

/// Compress and save a document to `destination`
fn write_document(doc: &mut Document, destination: &Path, memory: MemoryUsage) -> Result<()> {
    doc.compress();
    match memory {
        MemoryUsage::MainMemoryOnly => {
            let mut buffer = Vec::new();
            doc.save_to(&mut buffer)?;
            fs::write(destination, buffer)?;
        }
        MemoryUsage::Streamed => {
            doc.save(destination)?;
        }
    }
    Ok(())
}
