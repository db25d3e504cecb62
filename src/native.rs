//! Native dialogs through rfd
//!
//! File pickers and notices are the platform's own. Commands still come in
//! on a console, so this type also carries the console streams.

use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::debug;
use crate::app::WINDOW_TITLE;
use crate::notice::Notice;
use crate::terminal::{read_input_line, Console};
use crate::ui::{Dialogs, FileFilter, OpenRequest, SaveRequest};

/// True when a native dialog can be shown
///
/// Windows and macOS always have one; elsewhere an X11 or Wayland display
/// must be set.
pub fn available() -> bool {
    cfg!(any(target_os = "windows", target_os = "macos"))
        || has_display(
            std::env::var_os("DISPLAY").as_deref(),
            std::env::var_os("WAYLAND_DISPLAY").as_deref(),
        )
}

fn has_display(x11: Option<&OsStr>, wayland: Option<&OsStr>) -> bool {
    [x11, wayland]
        .into_iter()
        .flatten()
        .any(|value| !value.is_empty())
}

/// [`Dialogs`] shown by the platform, with a console for commands
pub struct NativeDialogs<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> NativeDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Dialogs for NativeDialogs<R, W> {
    fn open_files(&mut self, request: &OpenRequest) -> Vec<PathBuf> {
        let chosen = file_dialog(&request.filter, request.initial_directory.as_deref())
            .set_title("Add PDF")
            .pick_files()
            .unwrap_or_default();
        debug!("Open dialog returned {} files", chosen.len());
        chosen
    }

    fn save_file(&mut self, request: &SaveRequest) -> Option<PathBuf> {
        let chosen = file_dialog(&request.filter, request.initial_directory.as_deref())
            .set_title("Combine PDFs")
            .save_file()?;
        let path = request.filter.ensure_extension(chosen.clone());

        // The platform dialog only asked about the name it returned
        if needs_replace_confirmation(&chosen, &path) && !confirm_replace(&path) {
            return None;
        }
        Some(path)
    }

    fn notify(&mut self, notice: &Notice) {
        let level = if notice.is_error() {
            MessageLevel::Error
        } else {
            MessageLevel::Info
        };
        MessageDialog::new()
            .set_level(level)
            .set_title(notice.title.as_str())
            .set_description(notice.message.as_str())
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl<R: BufRead, W: Write> Console for NativeDialogs<R, W> {
    fn read_line(&mut self) -> Option<String> {
        read_input_line(&mut self.input)
    }

    fn writer(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

fn file_dialog(filter: &FileFilter, directory: Option<&Path>) -> FileDialog {
    let dialog = FileDialog::new().add_filter(filter.description, &[filter.extension]);
    match directory {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

/// The written file differs from the picked one and would be replaced
fn needs_replace_confirmation(chosen: &Path, written: &Path) -> bool {
    chosen != written && written.exists()
}

fn confirm_replace(path: &Path) -> bool {
    let answer = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(WINDOW_TITLE)
        .set_description(format!("{} already exists. Replace it?", path.display()))
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(answer, MessageDialogResult::Yes)
}
