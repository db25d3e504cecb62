//! Picking input files

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::document_list::DocumentList;
use crate::ui::{Dialogs, FileFilter, OpenRequest, SaveRequest};

/// Opens PDF pickers and remembers where the user last picked from
///
/// The remembered directory lives for the session only.
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    last_directory: Option<PathBuf>,
}

impl FileSelector {
    pub fn new(initial_directory: Option<PathBuf>) -> Self {
        Self {
            last_directory: initial_directory,
        }
    }

    pub fn last_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref()
    }

    /// Ask for PDFs and append every chosen file to `list`
    ///
    /// Returns the chosen paths; empty when the user cancelled, in which
    /// case nothing changes.
    pub fn select_files<D: Dialogs + ?Sized>(
        &mut self,
        dialogs: &mut D,
        list: &mut DocumentList,
    ) -> Vec<PathBuf> {
        let request = OpenRequest {
            initial_directory: self.last_directory.clone(),
            filter: FileFilter::PDF,
        };

        let chosen = dialogs.open_files(&request);
        if let Some(last) = chosen.last() {
            if let Some(parent) = last.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.last_directory = Some(parent.to_path_buf());
            }
            debug!("Adding {} files to the list", chosen.len());
            list.extend(chosen.iter().cloned());
        }
        chosen
    }

    /// Save-as request starting from the remembered directory
    pub fn save_request(&self) -> SaveRequest {
        SaveRequest {
            initial_directory: self.last_directory.clone(),
            filter: FileFilter::PDF,
        }
    }
}
