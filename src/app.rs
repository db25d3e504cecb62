//! Session controller
//!
//! Owns everything that lives for one session (the list, the remembered
//! directory, the dialogs) and turns user commands into calls on them. A
//! failed command only fails that command; the session stays usable.

use std::path::{Path, PathBuf};
use tracing::debug;
use crate::combine::MergeInvoker;
use crate::document_list::DocumentList;
use crate::error::Result;
use crate::pdf::{MemoryUsage, MergeEngine, PdfMerger};
use crate::selector::FileSelector;
use crate::ui::Dialogs;

pub const WINDOW_TITLE: &str = "PDFs to PDF";

/// A discrete user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// "Add PDF": pick files and append them
    AddPdf,
    /// "Remove PDF": drop the selected entry, or the last one
    RemovePdf,
    /// "Clear PDFs"
    ClearPdfs,
    /// Change the list selection; `None` clears it
    Select(Option<usize>),
    MoveUp,
    MoveDown,
    /// "Combine": merge the list into one file
    Combine,
}

/// One session of the combiner
pub struct App<D, F> {
    dialogs: D,
    list: DocumentList,
    selector: FileSelector,
    invoker: MergeInvoker,
    new_engine: F,
}

impl<D: Dialogs> App<D, fn() -> PdfMerger> {
    /// Session backed by the lopdf merger
    pub fn new(dialogs: D, initial_directory: Option<PathBuf>) -> Self {
        Self::with_engine(dialogs, initial_directory, PdfMerger::new)
    }
}

impl<D, E, F> App<D, F>
where
    D: Dialogs,
    E: MergeEngine,
    F: FnMut() -> E,
{
    /// Session using `new_engine` to get a fresh engine for every combine
    pub fn with_engine(dialogs: D, initial_directory: Option<PathBuf>, new_engine: F) -> Self {
        Self {
            dialogs,
            list: DocumentList::new(),
            selector: FileSelector::new(initial_directory),
            invoker: MergeInvoker::new(MemoryUsage::MainMemoryOnly),
            new_engine,
        }
    }

    pub fn list(&self) -> &DocumentList {
        &self.list
    }

    pub fn last_directory(&self) -> Option<&Path> {
        self.selector.last_directory()
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    /// Run one command to completion
    pub fn handle(&mut self, command: Command) -> Result<()> {
        debug!("Handling {:?}", command);
        match command {
            Command::AddPdf => {
                self.selector.select_files(&mut self.dialogs, &mut self.list);
            }
            Command::RemovePdf => {
                if let Some(removed) = self.list.remove_selected_or_last() {
                    debug!("Removed {}", removed.path().display());
                }
            }
            Command::ClearPdfs => self.list.clear(),
            Command::Select(index) => self.list.select(index),
            Command::MoveUp => {
                self.list.move_selected_up();
            }
            Command::MoveDown => {
                self.list.move_selected_down();
            }
            Command::Combine => {
                let mut engine = (self.new_engine)();
                let request = self.selector.save_request();
                self.invoker
                    .combine(&self.list, &request, &mut self.dialogs, &mut engine)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notice::{self, Notice};
    use crate::pdf::MergeSummary;
    use crate::ui::{OpenRequest, SaveRequest};
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct ScriptedDialogs {
        opens: VecDeque<Vec<PathBuf>>,
        saves: VecDeque<PathBuf>,
        notices: Vec<Notice>,
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

    /// Counts merges through a shared counter
    struct CountingEngine {
        merges: Rc<Cell<usize>>,
    }

    impl MergeEngine for CountingEngine {
        fn set_destination(&mut self, _path: &Path) {}

        fn add_source(&mut self, _path: &Path) -> Result<()> {
            Ok(())
        }

        fn merge_documents(&mut self, _memory: MemoryUsage) -> Result<MergeSummary> {
            self.merges.set(self.merges.get() + 1);
            Ok(MergeSummary {
                sources: 0,
                pages: 0,
                output: PathBuf::new(),
            })
        }
    }

    fn app(
        dialogs: ScriptedDialogs,
    ) -> (App<ScriptedDialogs, impl FnMut() -> CountingEngine>, Rc<Cell<usize>>) {
        let merges = Rc::new(Cell::new(0));
        let counter = Rc::clone(&merges);
        let app = App::with_engine(dialogs, None, move || CountingEngine {
            merges: Rc::clone(&counter),
        });
        (app, merges)
    }

    #[test]
    fn test_add_twice_appends() {
        let mut dialogs = ScriptedDialogs::default();
        dialogs.opens.push_back(vec![PathBuf::from("/a/x.pdf")]);
        dialogs.opens.push_back(vec![PathBuf::from("/b/x.pdf"), PathBuf::from("/b/y.pdf")]);
        let (mut app, _) = app(dialogs);

        app.handle(Command::AddPdf).unwrap();
        app.handle(Command::AddPdf).unwrap();

        assert_eq!(app.list().display_names(), vec!["x.pdf", "x.pdf", "y.pdf"]);
        assert_eq!(app.last_directory(), Some(Path::new("/b")));
    }

    #[test]
    fn test_remove_on_empty_list_is_silent() {
        let (mut app, _) = app(ScriptedDialogs::default());

        app.handle(Command::RemovePdf).unwrap();

        assert!(app.list().is_empty());
        assert!(app.dialogs().notices.is_empty());
    }

    #[test]
    fn test_clear_then_combine_matches_fresh_session() {
        let mut dialogs = ScriptedDialogs::default();
        dialogs.opens.push_back(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
        let (mut used, used_merges) = app(dialogs);
        used.handle(Command::AddPdf).unwrap();
        used.handle(Command::ClearPdfs).unwrap();
        let used_result = used.handle(Command::Combine);

        let (mut fresh, fresh_merges) = app(ScriptedDialogs::default());
        let fresh_result = fresh.handle(Command::Combine);

        assert!(matches!(used_result, Err(Error::Validation(_))));
        assert!(matches!(fresh_result, Err(Error::Validation(_))));
        assert_eq!(used.dialogs().notices, fresh.dialogs().notices);
        assert_eq!(used_merges.get(), 0);
        assert_eq!(fresh_merges.get(), 0);
    }

    #[test]
    fn test_combine_runs_after_reorder() {
        let mut dialogs = ScriptedDialogs::default();
        dialogs.opens.push_back(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
        dialogs.saves.push_back(PathBuf::from("combined.pdf"));
        let (mut app, merges) = app(dialogs);

        app.handle(Command::AddPdf).unwrap();
        app.handle(Command::Select(Some(1))).unwrap();
        app.handle(Command::MoveUp).unwrap();
        app.handle(Command::Combine).unwrap();

        assert_eq!(app.list().display_names(), vec!["b.pdf", "a.pdf"]);
        assert_eq!(merges.get(), 1);
        assert_eq!(
            app.dialogs().notices.last(),
            Some(&Notice::success(notice::COMBINED))
        );
    }

    #[test]
    fn test_session_survives_failed_command() {
        let (mut app, _) = app(ScriptedDialogs::default());

        assert!(app.handle(Command::Combine).is_err());
        app.dialogs_mut().opens.push_back(vec![PathBuf::from("a.pdf")]);
        app.handle(Command::AddPdf).unwrap();

        assert_eq!(app.list().len(), 1);
    }
}
