//! `bookren [FLAGS] PATH...` – rename books and their companions.

use anyhow::Result;
use bookren_core::process::{self, ProcessOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Processes `paths` in order, printing status lines to stdout.
pub fn run_rename(paths: &[PathBuf], opts: &ProcessOptions) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let reports = process::process_paths(paths, opts, &mut out)?;
    out.flush()?;

    let renamed: usize = reports.iter().map(|r| r.renamed_count()).sum();
    tracing::info!(
        books = reports.len(),
        skipped = paths.len() - reports.len(),
        files_renamed = renamed,
        "run completed"
    );
    Ok(())
}
