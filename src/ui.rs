//! Dialog seam between the session logic and a concrete front end

use std::path::{Path, PathBuf};
use crate::notice::Notice;

/// Extension filter offered by open and save dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub description: &'static str,
    pub extension: &'static str,
}

impl FileFilter {
    pub const PDF: FileFilter = FileFilter {
        description: "PDF files (*.pdf)",
        extension: "pdf",
    };

    /// Case-insensitive extension match
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(self.extension))
            .unwrap_or(false)
    }

    /// Append the filter's extension unless the name already matches
    ///
    /// `report` and `report.v2` become `report.pdf` and `report.v2.pdf`.
    pub fn ensure_extension(&self, path: PathBuf) -> PathBuf {
        if self.matches(&path) {
            return path;
        }
        let Some(name) = path.file_name() else {
            return path;
        };
        let mut name = name.to_os_string();
        name.push(".");
        name.push(self.extension);
        path.with_file_name(name)
    }
}

/// Parameters of an open-files dialog
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub initial_directory: Option<PathBuf>,
    pub filter: FileFilter,
}

/// Parameters of a save-as dialog
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub initial_directory: Option<PathBuf>,
    pub filter: FileFilter,
}

/// The dialogs a front end must provide
///
/// Every call blocks until the user answers.
pub trait Dialogs {
    /// Pick zero or more files; an empty result means cancel
    fn open_files(&mut self, request: &OpenRequest) -> Vec<PathBuf>;

    /// Pick an output path; `None` means cancel
    fn save_file(&mut self, request: &SaveRequest) -> Option<PathBuf>;

    /// Show a notice and wait for it to be dismissed
    fn notify(&mut self, notice: &Notice);
}
