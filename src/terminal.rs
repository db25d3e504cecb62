//! Command prompt and line-oriented dialogs
//!
//! [`Shell`] reads commands from a [`Console`] and drives an [`App`]. The
//! dialogs can be native ([`crate::native::NativeDialogs`]) or answered on
//! the same console by [`TerminalDialogs`], which works on any
//! `BufRead`/`Write` pair so a session can be scripted.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use glob::glob;
use tracing::{debug, warn};
use crate::app::{App, Command, WINDOW_TITLE};
use crate::error::Result;
use crate::notice::Notice;
use crate::pdf::MergeEngine;
use crate::ui::{Dialogs, OpenRequest, SaveRequest};

const HELP: &str = "\
Commands:
  add            pick PDF files to append to the list
  remove         remove the selected file, or the last one
  clear          empty the list
  select <n>     select entry n (select with no number clears the selection)
  up / down      move the selected entry
  list           show the list
  combine        combine the listed files into one PDF
  help           show this text
  quit           leave";

/// Line input and output for the command prompt
pub trait Console {
    /// Next input line without its line ending; `None` at end of input
    fn read_line(&mut self) -> Option<String>;

    fn writer(&mut self) -> &mut dyn Write;
}

/// Dialogs answered on a terminal
pub struct TerminalDialogs<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Next input line without its line ending; `None` at end of input
    pub fn read_line(&mut self) -> Option<String> {
        read_input_line(&mut self.input)
    }

    /// Print a prompt without a newline and read the answer
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.say_inline(prompt);
        self.read_line()
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text) {
            warn!("Failed to write output: {}", e);
        }
    }

    fn say_inline(&mut self, text: &str) {
        if let Err(e) = write!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            warn!("Failed to write output: {}", e);
        }
    }

    /// Turn one typed entry into zero or more acceptable files
    fn expand_entry(&mut self, entry: &str, request: &OpenRequest) -> Vec<PathBuf> {
        let path = resolve(entry, request.initial_directory.as_deref());

        if is_pattern(entry) {
            let pattern = path.to_string_lossy().into_owned();
            let matches: Vec<PathBuf> = match glob(&pattern) {
                Ok(paths) => paths
                    .filter_map(|entry| match entry {
                        Ok(path) => Some(path),
                        Err(e) => {
                            warn!("Glob error for {}: {}", pattern, e);
                            None
                        }
                    })
                    .filter(|path| path.is_file() && request.filter.matches(path))
                    .collect(),
                Err(e) => {
                    self.say(&format!("Invalid pattern {}: {}", entry, e));
                    return Vec::new();
                }
            };
            if matches.is_empty() {
                self.say(&format!("No {} match {}", request.filter.description, entry));
            }
            return matches;
        }

        if !request.filter.matches(&path) {
            self.say(&format!("Not one of {}: {}", request.filter.description, entry));
            return Vec::new();
        }
        if !path.is_file() {
            self.say(&format!("No such file: {}", path.display()));
            return Vec::new();
        }
        vec![path]
    }
}

impl<R: BufRead, W: Write> Dialogs for TerminalDialogs<R, W> {
    fn open_files(&mut self, request: &OpenRequest) -> Vec<PathBuf> {
        self.say(&format!(
            "Open {}, one path or pattern per line, blank line to finish",
            request.filter.description
        ));
        if let Some(dir) = &request.initial_directory {
            self.say(&format!("Relative to {}", dir.display()));
        }

        let mut chosen = Vec::new();
        while let Some(line) = self.ask("open> ") {
            let entry = unquote(line.trim());
            if entry.is_empty() {
                break;
            }
            chosen.extend(self.expand_entry(entry, request));
        }
        debug!("Open dialog returned {} files", chosen.len());
        chosen
    }

    fn save_file(&mut self, request: &SaveRequest) -> Option<PathBuf> {
        if let Some(dir) = &request.initial_directory {
            self.say(&format!("Relative to {}", dir.display()));
        }
        let line = self.ask(&format!("Save as ({}), blank to cancel: ", request.filter.description))?;
        let entry = unquote(line.trim());
        if entry.is_empty() {
            return None;
        }

        let path = request
            .filter
            .ensure_extension(resolve(entry, request.initial_directory.as_deref()));
        if path.exists() {
            let answer = self.ask(&format!("{} exists. Replace it? [y/N] ", path.display()))?;
            if !answer.trim().eq_ignore_ascii_case("y") {
                return None;
            }
        }
        Some(path)
    }

    fn notify(&mut self, notice: &Notice) {
        self.say(&format!("[{}] {}", notice.title, notice.message));
        // Ok
        let _ = self.ask("Press Enter to continue ");
    }
}

impl<R: BufRead, W: Write> Console for TerminalDialogs<R, W> {
    fn read_line(&mut self) -> Option<String> {
        TerminalDialogs::read_line(self)
    }

    fn writer(&mut self) -> &mut dyn Write {
        &mut self.output
    }
}

/// What one line typed at the shell prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Run(Command),
    List,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse a shell line; entry numbers are 1-based
pub fn parse_command(line: &str) -> ShellInput {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return ShellInput::Empty;
    };
    let argument = words.next();

    match (word.to_ascii_lowercase().as_str(), argument) {
        ("add" | "a", None) => ShellInput::Run(Command::AddPdf),
        ("remove" | "rm", None) => ShellInput::Run(Command::RemovePdf),
        ("clear", None) => ShellInput::Run(Command::ClearPdfs),
        ("select" | "sel", None) => ShellInput::Run(Command::Select(None)),
        ("select" | "sel", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => ShellInput::Run(Command::Select(Some(n - 1))),
            _ => ShellInput::Unknown(line.trim().to_string()),
        },
        ("up", None) => ShellInput::Run(Command::MoveUp),
        ("down", None) => ShellInput::Run(Command::MoveDown),
        ("combine" | "merge", None) => ShellInput::Run(Command::Combine),
        ("list" | "ls", None) => ShellInput::List,
        ("help" | "?", None) => ShellInput::Help,
        ("quit" | "exit" | "q", None) => ShellInput::Quit,
        _ => ShellInput::Unknown(line.trim().to_string()),
    }
}

/// Interactive command loop over a session
pub struct Shell<D, F> {
    app: App<D, F>,
}

impl<D, E, F> Shell<D, F>
where
    D: Dialogs + Console,
    E: MergeEngine,
    F: FnMut() -> E,
{
    pub fn new(app: App<D, F>) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &App<D, F> {
        &self.app
    }

    /// Read and run commands until `quit` or end of input
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.out(), "{} (type help for commands)", WINDOW_TITLE)?;

        loop {
            write!(self.out(), "pdfs> ")?;
            self.out().flush()?;
            let Some(line) = self.app.dialogs_mut().read_line() else {
                writeln!(self.out())?;
                break;
            };

            match parse_command(&line) {
                ShellInput::Run(command) => {
                    match self.app.handle(command) {
                        Ok(()) => {}
                        Err(e) if e.is_validation() => debug!("{:?} rejected: {}", command, e),
                        Err(e) => warn!("{:?} failed: {}", command, e),
                    }
                    if command != Command::Combine {
                        self.print_list()?;
                    }
                }
                ShellInput::List => self.print_list()?,
                ShellInput::Help => writeln!(self.out(), "{}", HELP)?,
                ShellInput::Quit => break,
                ShellInput::Empty => {}
                ShellInput::Unknown(text) => {
                    writeln!(self.out(), "Unknown command: {} (type help)", text)?
                }
            }
        }
        Ok(())
    }

    fn out(&mut self) -> &mut dyn Write {
        self.app.dialogs_mut().writer()
    }

    fn print_list(&mut self) -> Result<()> {
        let list = self.app.list();
        let lines: Vec<String> = if list.is_empty() {
            vec!["  (no files)".to_string()]
        } else {
            list.display_names()
                .into_iter()
                .enumerate()
                .map(|(i, name)| {
                    let marker = if list.selected() == Some(i) { '>' } else { ' ' };
                    format!("{}{:>3}. {}", marker, i + 1, name)
                })
                .collect()
        };
        for line in lines {
            writeln!(self.out(), "{}", line)?;
        }
        Ok(())
    }
}

/// One line from `input` without its line ending; `None` at end of input
pub(crate) fn read_input_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            warn!("Failed to read input: {}", e);
            None
        }
    }
}

fn is_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

fn unquote(entry: &str) -> &str {
    entry.trim_matches(|c| c == '"' || c == '\'')
}

/// Resolve a typed path against the dialog's starting directory
fn resolve(entry: &str, base: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(entry);
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}
