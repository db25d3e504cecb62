//! Error types for the PDF combiner

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF combiner
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A listed source could not be opened when the merge started
    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// A precondition of the requested action does not hold
    #[error("{0}")]
    Validation(String),

    /// Merge was started without a destination
    #[error("No destination file set")]
    NoDestination,

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// True for errors that abort an action before any I/O happened
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
