//! Per-book pipeline: read metadata, derive the name, rename the book and
//! whatever companions were asked for.
//!
//! Status lines go to the caller's writer in the order the work happens:
//! `# <new name>`, rename notices, cover progress.

use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::config::BookrenConfig;
use crate::cover::{self, CoverOutcome, CoverSource};
use crate::mobi;
use crate::naming::{self, NameLimits};
use crate::rename::{self, Companions, RenameOutcome, PRIMARY_EXTENSION};

/// Everything that decides how one book is renamed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOptions {
    pub author_prefix: String,
    pub limits: NameLimits,
    pub companions: Companions,
    pub rename_opf: bool,
    /// `Some` when the cover should be renamed or fetched.
    pub cover: Option<CoverSource>,
}

impl ProcessOptions {
    /// Options from config with every optional step off.
    pub fn from_config(cfg: &BookrenConfig) -> Self {
        Self {
            author_prefix: cfg.author_prefix.clone(),
            limits: NameLimits::from(cfg),
            companions: Companions::default(),
            rename_opf: false,
            cover: None,
        }
    }

    pub fn with_cover_from(mut self, cfg: &BookrenConfig) -> Self {
        self.cover = Some(CoverSource {
            url_template: cfg.cover_url_template.clone(),
            settings: cfg.cover_settings(),
        });
        self
    }
}

/// What happened to one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub source: PathBuf,
    pub new_name: String,
    /// Primary file first, then companions, then the OPF sidecar.
    pub renames: Vec<RenameOutcome>,
    pub cover: Option<CoverOutcome>,
}

impl ProcessReport {
    pub fn renamed_count(&self) -> usize {
        self.renames.iter().filter(|r| r.is_renamed()).count()
    }
}

/// Resolves `.` and `..` without touching the filesystem. `..` at the root
/// stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// The file name without `.azw3`, compared on the raw bytes so names that
/// are not valid UTF-8 still match.
fn book_base(file_name: &OsStr) -> Option<OsString> {
    if file_name == OsStr::new(PRIMARY_EXTENSION) {
        return Some(OsString::new());
    }
    let bytes = file_name.as_encoded_bytes();
    if !bytes.ends_with(PRIMARY_EXTENSION.as_bytes()) {
        return None;
    }
    // "x.azw3": the stem is everything before the final ".azw3"
    Path::new(file_name).file_stem().map(OsStr::to_os_string)
}

/// Splits `path` into its absolute, normalized directory and the file name
/// without `.azw3`. `None` for anything that is not an `.azw3` file name.
fn book_location(path: &Path) -> Result<Option<(PathBuf, OsString)>> {
    let Some(base) = path.file_name().and_then(book_base) else {
        return Ok(None);
    };
    let abs = std::path::absolute(path)
        .with_context(|| format!("cannot resolve {}", path.display()))?;
    let abs = normalize_lexically(&abs);
    let dir = abs
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));
    Ok(Some((dir, base)))
}

/// Runs the pipeline for one path. Returns `Ok(None)` when the path is not
/// an `.azw3` book and was skipped.
pub fn process_path<W: Write>(
    path: &Path,
    opts: &ProcessOptions,
    out: &mut W,
) -> Result<Option<ProcessReport>> {
    let Some((dir, base)) = book_location(path)? else {
        tracing::debug!(path = %path.display(), "skipping, not an {} file", PRIMARY_EXTENSION);
        return Ok(None);
    };

    let book_path = dir.join(rename::file_name_with(&base, PRIMARY_EXTENSION));
    let meta = mobi::read_metadata(&book_path)
        .with_context(|| format!("failed to read metadata from {}", book_path.display()))?;
    let name = naming::derive_name(&meta, &opts.author_prefix, &opts.limits);
    let new_name = name.stem();
    writeln!(out, "# {}", new_name)?;
    tracing::info!(source = %book_path.display(), new_name = %new_name, "derived name");

    let mut renames = Vec::new();
    let mut record = |outcome: RenameOutcome, out: &mut W| -> Result<()> {
        if let Some(line) = outcome.status_line() {
            writeln!(out, "{}", line)?;
        }
        renames.push(outcome);
        Ok(())
    };

    record(
        rename::rename_book(&dir, &base, &new_name, PRIMARY_EXTENSION)?,
        &mut *out,
    )?;
    for ext in opts.companions.extensions() {
        record(rename::rename_book(&dir, &base, &new_name, ext)?, &mut *out)?;
    }

    let cover = match &opts.cover {
        Some(source) => Some(cover::get_cover(&dir, &new_name, &name.asin, source, out)?),
        None => None,
    };

    if opts.rename_opf {
        let outcome = rename::rename_opf(&dir, &new_name, &mut *out)?;
        record(outcome, &mut *out)?;
    }

    Ok(Some(ProcessReport {
        source: book_path,
        new_name,
        renames,
        cover,
    }))
}

/// Processes `paths` in order, stopping at the first error.
pub fn process_paths<W: Write>(
    paths: &[PathBuf],
    opts: &ProcessOptions,
    out: &mut W,
) -> Result<Vec<ProcessReport>> {
    let mut reports = Vec::new();
    for path in paths {
        if let Some(report) = process_path(path, opts, out)? {
            reports.push(report);
        }
    }
    Ok(reports)
}
