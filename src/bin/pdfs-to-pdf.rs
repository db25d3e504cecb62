//! PDFs to PDF
//!
//! Interactive tool for combining several PDF files into one.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pdfs_to_pdf::app::App;
use pdfs_to_pdf::native::{self, NativeDialogs};
use pdfs_to_pdf::terminal::{Console, Shell, TerminalDialogs};
use pdfs_to_pdf::ui::Dialogs;

/// PDFs to PDF - Combine several PDF files into one
#[derive(Parser)]
#[command(name = "pdfs-to-pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Type `help` at the prompt for the list of commands.
Files are picked in native dialogs; without a display the prompts fall back to the terminal.
Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostic output on stderr.")]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let start_dir = std::env::current_dir().ok();
    if native::available() {
        run(NativeDialogs::new(io::stdin().lock(), io::stdout()), start_dir)
    } else {
        info!("No display found, using terminal prompts");
        run(TerminalDialogs::new(io::stdin().lock(), io::stdout()), start_dir)
    }
}

fn run<D: Dialogs + Console>(dialogs: D, start_dir: Option<PathBuf>) -> Result<()> {
    let mut shell = Shell::new(App::new(dialogs, start_dir));
    shell.run().context("Session failed")?;
    Ok(())
}
