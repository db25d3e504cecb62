//! Combining the listed PDFs into one output file
//!
//! The checks run in this order, each one stopping the action with a notice:
//!
//! 1. the list holds at least two files
//! 2. the user picked an output file (cancel stops silently)
//! 3. the output file name is not blank
//!
//! Sources that cannot be opened are reported one by one and skipped. A
//! failure of the merge itself is reported and handed back to the caller.

use std::path::Path;
use tracing::{info, warn};
use crate::document_list::DocumentList;
use crate::error::{Error, Result};
use crate::notice::{self, Notice};
use crate::pdf::{MemoryUsage, MergeEngine, MergeSummary};
use crate::ui::{Dialogs, SaveRequest};

/// Fewest list entries a merge accepts
pub const MIN_SOURCES: usize = 2;

/// Runs one combine action against a [`MergeEngine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeInvoker {
    memory: MemoryUsage,
}

impl MergeInvoker {
    pub fn new(memory: MemoryUsage) -> Self {
        Self { memory }
    }

    /// Combine `list` into a file chosen through `dialogs`
    ///
    /// Returns `Ok(None)` when the user cancelled the save dialog. Validation
    /// failures come back as [`Error::Validation`] after their notice was
    /// shown, without `engine` being touched.
    pub fn combine<D, E>(
        &self,
        list: &DocumentList,
        request: &SaveRequest,
        dialogs: &mut D,
        engine: &mut E,
    ) -> Result<Option<MergeSummary>>
    where
        D: Dialogs + ?Sized,
        E: MergeEngine + ?Sized,
    {
        if list.len() < MIN_SOURCES {
            return Err(reject(dialogs, notice::TOO_FEW_FILES));
        }

        let Some(output) = dialogs.save_file(request) else {
            info!("Combine cancelled");
            return Ok(None);
        };

        if !has_file_name(&output) {
            return Err(reject(dialogs, notice::BLANK_FILE_NAME));
        }
        let output = request.filter.ensure_extension(output);

        engine.set_destination(&output);
        for path in list.paths() {
            if let Err(e) = engine.add_source(path) {
                warn!("Skipping {}: {}", path.display(), e);
                dialogs.notify(&Notice::error(e.to_string()));
            }
        }

        match engine.merge_documents(self.memory) {
            Ok(summary) => {
                dialogs.notify(&Notice::success(notice::COMBINED));
                Ok(Some(summary))
            }
            Err(e) => {
                warn!("Combining into {} failed: {}", output.display(), e);
                dialogs.notify(&Notice::error(e.to_string()));
                Err(e)
            }
        }
    }
}

fn reject<D: Dialogs + ?Sized>(dialogs: &mut D, message: &str) -> Error {
    dialogs.notify(&Notice::error(message));
    Error::Validation(message.to_string())
}

fn has_file_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| !name.to_string_lossy().trim().is_empty())
        .unwrap_or(false)
}
