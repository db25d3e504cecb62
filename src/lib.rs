//! PDFs to PDF
//!
//! Pick several PDF files, arrange them in a list and combine them into a
//! single PDF. This library provides:
//! - An ordered document list with selection, removal and reordering
//! - A file selector that remembers the last directory for the session
//! - The combine action: validation, output prompt and merge
//! - PDF merging on top of lopdf
//! - Native file pickers and message boxes, with a terminal fallback
//!
//! # Example
//!
//! ```no_run
//! use pdfs_to_pdf::app::{App, Command};
//! use pdfs_to_pdf::terminal::TerminalDialogs;
//! use std::io;
//!
//! let dialogs = TerminalDialogs::new(io::stdin().lock(), io::stdout());
//! let mut app = App::new(dialogs, None);
//!
//! app.handle(Command::AddPdf).ok();
//! app.handle(Command::Combine).ok();
//! ```

pub mod app;
pub mod combine;
pub mod document_list;
pub mod error;
pub mod native;
pub mod notice;
pub mod pdf;
pub mod selector;
pub mod terminal;
pub mod ui;

// Re-export commonly used items
pub use app::{App, Command};
pub use document_list::{DocumentList, SelectedFile};
pub use error::{Error, Result};
pub use notice::Notice;
