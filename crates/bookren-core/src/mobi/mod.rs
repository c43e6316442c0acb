//! Kindle MOBI/AZW3 metadata reader.
//!
//! Reads just enough of the PalmDB container to reach the EXTH block in
//! record 0 and pull out the title, author list and ASIN. No text records are
//! decompressed.

mod encoding;
mod error;
mod exth;
mod header;

pub use encoding::TextEncoding;
pub use error::MetadataError;
pub use exth::{EXTH_ASIN, EXTH_ASIN_ALT, EXTH_AUTHOR, EXTH_UPDATED_TITLE};

use std::fs;
use std::path::Path;

/// Metadata needed to name a book file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: String,
    /// Authors in the order they appear, as stored (often `Last, First`).
    pub authors: Vec<String>,
    pub asin: String,
}

/// Reads and parses the metadata of the book at `path`.
pub fn read_metadata(path: &Path) -> Result<BookMetadata, MetadataError> {
    let data = fs::read(path).map_err(|source| MetadataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_metadata(&data)
}

/// Parses metadata from the raw bytes of a MOBI/AZW3 file.
///
/// Title comes from EXTH 503 (updated title), then the MOBI full name, then
/// the PalmDB name. ASIN comes from EXTH 113, then 504. Every EXTH 100 record
/// is an author.
pub fn parse_metadata(data: &[u8]) -> Result<BookMetadata, MetadataError> {
    let palm = header::parse_palm_header(data)?;
    let mobi = header::parse_mobi_header(data, &palm)?;
    let records = match mobi.exth_offset {
        Some(offset) => exth::parse_exth(data, offset)?,
        None => Vec::new(),
    };

    let mut updated_title = None;
    let mut asin = None;
    let mut asin_alt = None;
    let mut authors = Vec::new();
    for record in &records {
        let text = || mobi.encoding.decode(record.data).trim().to_string();
        match record.kind {
            EXTH_AUTHOR => {
                let author = text();
                if !author.is_empty() {
                    authors.push(author);
                }
            }
            EXTH_UPDATED_TITLE if updated_title.is_none() => updated_title = Some(text()),
            EXTH_ASIN if asin.is_none() => asin = Some(text()),
            EXTH_ASIN_ALT if asin_alt.is_none() => asin_alt = Some(text()),
            _ => {}
        }
    }

    let non_empty = |s: &String| !s.trim().is_empty();
    let title = updated_title
        .filter(non_empty)
        .or_else(|| mobi.full_name.clone().filter(non_empty))
        .or_else(|| Some(palm.name.clone()).filter(non_empty))
        .ok_or(MetadataError::MissingTitle)?;
    let asin = asin
        .filter(non_empty)
        .or_else(|| asin_alt.filter(non_empty))
        .ok_or(MetadataError::MissingAsin)?;

    tracing::debug!(
        title = %title,
        authors = authors.len(),
        asin = %asin,
        exth_records = records.len(),
        "parsed book metadata"
    );

    Ok(BookMetadata {
        title,
        authors,
        asin,
    })
}
