//! PDF manipulation module

pub mod merge;
pub mod metadata;

// Re-export commonly used items
pub use merge::{combine_documents, MemoryUsage, MergeEngine, MergeSummary, PdfMerger};
pub use metadata::count_pages;
