//! Errors raised while reading MOBI/AZW3 metadata.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field lies (partly) past the end of the file.
    #[error("truncated file: need {needed} bytes at offset {offset}, file has {len}")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("not a MOBI/AZW3 book (type/creator {found:?})")]
    NotMobi { found: String },

    #[error("PalmDB header lists no records")]
    NoRecords,

    #[error("record 0 has no MOBI header")]
    MissingMobiHeader,

    #[error("malformed EXTH block: {0}")]
    MalformedExth(String),

    #[error("unsupported text encoding {0}")]
    UnsupportedEncoding(u32),

    #[error("book has no title")]
    MissingTitle,

    #[error("book has no ASIN (EXTH 113/504)")]
    MissingAsin,
}
