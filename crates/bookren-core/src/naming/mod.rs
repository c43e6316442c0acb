//! Book file name derivation.
//!
//! Builds `"{title}.{asin}{prefix}{authors}"` from book metadata. The title is
//! the only part that gets shortened: it is clipped until the longest
//! companion file name (`.kepub.epub`) plus a reserve fits in the file name
//! byte limit.

mod author;
mod sanitize;
mod shorten;

pub use author::{join_authors, normalize_author};
pub use sanitize::{sanitize, title_case};
pub use shorten::{shorten_to_byte_width, CLIP_MARKER};

use crate::config::BookrenConfig;
use crate::mobi::BookMetadata;
use std::fmt;

/// Longest extension any renamed companion gets.
pub const LONGEST_COMPANION_SUFFIX: &str = ".kepub.epub";

/// Byte budget for a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameLimits {
    pub max_name_bytes: usize,
    pub reserve_bytes: usize,
}

impl Default for NameLimits {
    fn default() -> Self {
        Self {
            max_name_bytes: 255,
            reserve_bytes: 21,
        }
    }
}

impl From<&BookrenConfig> for NameLimits {
    fn from(cfg: &BookrenConfig) -> Self {
        Self {
            max_name_bytes: cfg.max_name_bytes,
            reserve_bytes: cfg.reserve_bytes,
        }
    }
}

/// Sanitized parts of a new book name. `Display` renders the file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookName {
    pub title: String,
    pub asin: String,
    pub prefix: String,
    pub author: String,
}

impl BookName {
    pub fn stem(&self) -> String {
        self.to_string()
    }

    /// Stem plus extension (which includes its leading dot).
    pub fn file_name(&self, ext: &str) -> String {
        format!("{}{}", self, ext)
    }
}

impl fmt::Display for BookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}{}{}", self.title, self.asin, self.prefix, self.author)
    }
}

/// Derives the new name for a book.
///
/// # Examples
///
/// - title `Re:Zero`, authors `["Doe, jane"]`, ASIN `B000000001`, prefix `" - "`
///   → `"Re_Zero.B000000001 - Jane Doe"`
pub fn derive_name(meta: &BookMetadata, prefix: &str, limits: &NameLimits) -> BookName {
    let title = sanitize(&meta.title, false);
    let author = title_case(&sanitize(&join_authors(&meta.authors), true));
    // ASINs are alphanumeric; sanitizing only matters for damaged metadata.
    let asin = sanitize(&meta.asin, false);

    let suffix_bytes = format!(".{}{}{}{}", asin, prefix, author, LONGEST_COMPANION_SUFFIX).len()
        + limits.reserve_bytes;
    let width = limits.max_name_bytes.saturating_sub(suffix_bytes);
    let title = shorten_to_byte_width(&title, width);

    BookName {
        title,
        asin,
        prefix: prefix.to_string(),
        author,
    }
}
