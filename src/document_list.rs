//! The ordered list of PDFs the user picked
//!
//! Insertion order is merge order. Entries are never validated here; a path
//! that disappeared is only noticed when the merge runs.

use std::fmt;
use std::path::{Path, PathBuf};

/// A path the user picked as a PDF input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile(PathBuf);

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name as shown in the list, falling back to the whole path
    pub fn display_name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.display().to_string())
    }
}

impl fmt::Display for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl From<PathBuf> for SelectedFile {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// Ordered, mutable sequence of picked files plus the current selection
#[derive(Debug, Clone, Default)]
pub struct DocumentList {
    entries: Vec<SelectedFile>,
    selected: Option<usize>,
}

impl DocumentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[SelectedFile] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(SelectedFile::path)
    }

    pub fn display_names(&self) -> Vec<String> {
        self.entries.iter().map(SelectedFile::display_name).collect()
    }

    /// Append to the end. Duplicates are kept.
    pub fn add(&mut self, file: impl Into<SelectedFile>) {
        self.entries.push(file.into());
    }

    pub fn extend<I>(&mut self, files: I)
    where
        I: IntoIterator,
        I::Item: Into<SelectedFile>,
    {
        self.entries.extend(files.into_iter().map(Into::into));
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select an entry; an index past the end clears the selection
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.entries.len());
    }

    /// Remove the selected entry, or the last one when nothing is selected
    ///
    /// Returns the removed entry; `None` on an empty list.
    pub fn remove_selected_or_last(&mut self) -> Option<SelectedFile> {
        let index = match self.selected.take() {
            Some(i) if i < self.entries.len() => i,
            _ => self.entries.len().checked_sub(1)?,
        };
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    /// Move the selected entry one place towards the front
    ///
    /// Returns false when nothing moved.
    pub fn move_selected_up(&mut self) -> bool {
        match self.selected {
            Some(i) if i > 0 && i < self.entries.len() => {
                self.entries.swap(i, i - 1);
                self.selected = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Move the selected entry one place towards the end
    pub fn move_selected_down(&mut self) -> bool {
        match self.selected {
            Some(i) if i + 1 < self.entries.len() => {
                self.entries.swap(i, i + 1);
                self.selected = Some(i + 1);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> DocumentList {
        let mut list = DocumentList::new();
        list.extend(names.iter().map(PathBuf::from));
        list
    }

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        let mut list = list_of(&["a.pdf", "b.pdf"]);
        list.extend([PathBuf::from("a.pdf")]);

        assert_eq!(list.display_names(), vec!["a.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_remove_on_empty_list_is_noop() {
        let mut list = DocumentList::new();
        assert_eq!(list.remove_selected_or_last(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_without_selection_takes_last() {
        let mut list = list_of(&["a.pdf", "b.pdf", "c.pdf"]);
        let removed = list.remove_selected_or_last().unwrap();

        assert_eq!(removed.path(), Path::new("c.pdf"));
        assert_eq!(list.display_names(), vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_remove_selected_entry() {
        let mut list = list_of(&["a.pdf", "b.pdf", "c.pdf"]);
        list.select(Some(0));
        list.remove_selected_or_last();

        assert_eq!(list.display_names(), vec!["b.pdf", "c.pdf"]);
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_select_out_of_range_clears_selection() {
        let mut list = list_of(&["a.pdf"]);
        list.select(Some(0));
        list.select(Some(5));
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_clear_resets_selection() {
        let mut list = list_of(&["a.pdf", "b.pdf"]);
        list.select(Some(1));
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_move_selection_follows_entry() {
        let mut list = list_of(&["a.pdf", "b.pdf", "c.pdf"]);
        list.select(Some(2));

        assert!(list.move_selected_up());
        assert_eq!(list.display_names(), vec!["a.pdf", "c.pdf", "b.pdf"]);
        assert_eq!(list.selected(), Some(1));

        assert!(list.move_selected_down());
        assert!(!list.move_selected_down());
        assert_eq!(list.display_names(), vec!["a.pdf", "b.pdf", "c.pdf"]);
    }

    #[test]
    fn test_move_without_selection() {
        let mut list = list_of(&["a.pdf", "b.pdf"]);
        assert!(!list.move_selected_up());
        assert!(!list.move_selected_down());
    }

    #[test]
    fn test_display_name_uses_file_name() {
        let file = SelectedFile::new("/tmp/docs/report.pdf");
        assert_eq!(file.to_string(), "report.pdf");
    }
}
