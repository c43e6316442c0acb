//! Renaming a book and its companion files inside one directory.
//!
//! Every rename is a no-op when the source is missing or the target already
//! exists; those cases come back as outcomes, not errors. Anything else the
//! filesystem reports is an error.

mod companion;

pub use companion::{Companion, Companions, PRIMARY_EXTENSION};

use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sidecar written by Calibre next to the book.
pub const OPF_FILE_NAME: &str = "metadata.opf";

/// What a single rename attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    /// Target already present; nothing was touched.
    AlreadyRenamed { to: PathBuf },
    /// Source absent; nothing was touched.
    NotFound { from: PathBuf },
}

impl RenameOutcome {
    /// The line reported to the user, if this outcome has one.
    pub fn status_line(&self) -> Option<String> {
        match self {
            RenameOutcome::Renamed { .. } => None,
            other => Some(other.to_string()),
        }
    }

    pub fn is_renamed(&self) -> bool {
        matches!(self, RenameOutcome::Renamed { .. })
    }
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameOutcome::Renamed { from, to } => {
                write!(f, "Renamed: {} -> {}", from.display(), to.display())
            }
            RenameOutcome::AlreadyRenamed { to } => {
                let name = to.file_name().unwrap_or_default().to_string_lossy();
                write!(f, "Already renamed: {}", name)
            }
            RenameOutcome::NotFound { from } => write!(f, "Not found: {}", from.display()),
        }
    }
}

/// Renames `from` to `to` unless `from` is missing or `to` exists.
pub fn rename_if_absent(from: &Path, to: &Path) -> Result<RenameOutcome> {
    rename_if_absent_with(from, to, || Ok(()))
}

/// [`rename_if_absent`], calling `before_rename` once both checks pass and
/// before the filesystem is touched.
pub fn rename_if_absent_with<F>(from: &Path, to: &Path, before_rename: F) -> Result<RenameOutcome>
where
    F: FnOnce() -> Result<()>,
{
    if !from.exists() {
        tracing::debug!(path = %from.display(), "rename source missing");
        return Ok(RenameOutcome::NotFound {
            from: from.to_path_buf(),
        });
    }
    if to.exists() {
        tracing::debug!(path = %to.display(), "rename target exists");
        return Ok(RenameOutcome::AlreadyRenamed {
            to: to.to_path_buf(),
        });
    }
    before_rename()?;
    fs::rename(from, to)
        .with_context(|| format!("failed to rename {} to {}", from.display(), to.display()))?;
    tracing::info!(from = %from.display(), to = %to.display(), "renamed");
    Ok(RenameOutcome::Renamed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
    })
}

/// `{base}{ext}` without going through `str`, so bases that are not valid
/// UTF-8 survive.
pub fn file_name_with(base: impl AsRef<OsStr>, ext: &str) -> OsString {
    let mut name = base.as_ref().to_os_string();
    name.push(ext);
    name
}

/// Renames `dir/{base}{ext}` to `dir/{new}{ext}`.
pub fn rename_book(
    dir: &Path,
    base: impl AsRef<OsStr>,
    new: &str,
    ext: &str,
) -> Result<RenameOutcome> {
    let from = dir.join(file_name_with(base, ext));
    let to = dir.join(file_name_with(new, ext));
    rename_if_absent(&from, &to)
}

/// Renames `dir/metadata.opf` to `dir/{new}.opf`, announcing the rename on
/// `out` just before it happens.
pub fn rename_opf<W: Write>(dir: &Path, new: &str, out: &mut W) -> Result<RenameOutcome> {
    let from = dir.join(OPF_FILE_NAME);
    let to = dir.join(format!("{}.opf", new));
    rename_if_absent_with(&from, &to, || {
        writeln!(out, "Rename {} ...", OPF_FILE_NAME)?;
        Ok(())
    })
}
