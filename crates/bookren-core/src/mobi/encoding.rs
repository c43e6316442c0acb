//! Text encodings a MOBI header can declare.

use super::MetadataError;

/// Windows-1252 code points for bytes 0x80..=0x9F. Unassigned bytes map to
/// the matching C1 control, like browsers do.
const CP1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Cp1252,
    Utf8,
}

impl TextEncoding {
    pub fn from_code(code: u32) -> Result<Self, MetadataError> {
        match code {
            1252 => Ok(TextEncoding::Cp1252),
            65001 => Ok(TextEncoding::Utf8),
            other => Err(MetadataError::UnsupportedEncoding(other)),
        }
    }

    /// Decodes `bytes`, dropping trailing NUL padding. Invalid UTF-8 is replaced, not rejected.
    pub fn decode(self, bytes: &[u8]) -> String {
        let end = bytes
            .iter()
            .rposition(|&b| b != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        let bytes = &bytes[..end];
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Cp1252 => bytes
                .iter()
                .map(|&b| match b {
                    0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
                    _ => b as char,
                })
                .collect(),
        }
    }
}
