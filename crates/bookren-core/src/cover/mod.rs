//! Cover image for a renamed book.
//!
//! A `cover.jpg` already sitting next to the book wins; otherwise the image
//! is fetched from the configured URL template with the book's ASIN.

mod error;
mod fetch;
mod template;

pub use self::error::CoverError;
pub use self::fetch::fetch_to_path;
pub use self::template::{cover_url, ASIN_PLACEHOLDER};

use crate::config::CoverConfig;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Cover file Calibre exports next to the book.
pub const LOCAL_COVER_NAME: &str = "cover.jpg";

/// How the cover ended up at its new name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverOutcome {
    RenamedLocal { path: PathBuf },
    Fetched { path: PathBuf, bytes: u64 },
}

/// Where to get covers from and how long to wait for them.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverSource {
    pub url_template: String,
    pub settings: CoverConfig,
}

/// Puts a cover at `dir/{new}.jpg`, writing status lines to `out`.
///
/// An existing target is overwritten: asking for a cover means asking for a
/// fresh one.
pub fn get_cover<W: Write>(
    dir: &Path,
    new: &str,
    asin: &str,
    source: &CoverSource,
    out: &mut W,
) -> Result<CoverOutcome> {
    let dest = dir.join(format!("{}.jpg", new));
    let local = dir.join(LOCAL_COVER_NAME);

    let outcome = if local.exists() {
        writeln!(out, "Rename {}...", LOCAL_COVER_NAME)?;
        fs::rename(&local, &dest).with_context(|| {
            format!("failed to rename {} to {}", local.display(), dest.display())
        })?;
        CoverOutcome::RenamedLocal { path: dest }
    } else {
        writeln!(out, "Fetching book cover...")?;
        out.flush()?;
        let url = cover_url(&source.url_template, asin)?;
        tracing::info!(url = %url, "fetching cover");
        let bytes = fetch_to_path(&url, &dest, &source.settings)
            .with_context(|| format!("failed to fetch cover for {}", asin))?;
        CoverOutcome::Fetched { path: dest, bytes }
    };

    writeln!(out, "done.")?;
    Ok(outcome)
}
