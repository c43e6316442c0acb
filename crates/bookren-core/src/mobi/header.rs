//! PalmDB and MOBI header parsing.
//!
//! Layout (all integers big-endian):
//! - PalmDB: name `[0..32)`, type/creator `[60..68)`, record count u16 at 76,
//!   then 8-byte record entries starting at 78 (u32 offset + attributes).
//! - Record 0: 16-byte PalmDOC header followed by the `MOBI` header. Offsets
//!   below are relative to the start of record 0.

use super::encoding::TextEncoding;
use super::MetadataError;

const PALM_HEADER_LEN: usize = 78;
const PALM_NAME_LEN: usize = 32;
const RECORD_ENTRY_LEN: usize = 8;
const TYPE_CREATOR: std::ops::Range<usize> = 60..68;

const MOBI_MAGIC_OFFSET: usize = 16;
const MOBI_HEADER_LEN_OFFSET: usize = 20;
const TEXT_ENCODING_OFFSET: usize = 28;
const FULL_NAME_OFFSET: usize = 84;
const FULL_NAME_LEN_OFFSET: usize = 88;
const EXTH_FLAGS_OFFSET: usize = 128;
const EXTH_PRESENT: u32 = 0x40;

/// Returns `len` bytes at `offset`, or `Truncated` if they are not all there.
pub(super) fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8], MetadataError> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or(MetadataError::Truncated {
            offset,
            needed: len,
            len: data.len(),
        })
}

pub(super) fn read_u16(data: &[u8], offset: usize) -> Result<u16, MetadataError> {
    let b = slice(data, offset, 2)?;
    Ok(u16::from_be_bytes([b[0], b[1]]))
}

pub(super) fn read_u32(data: &[u8], offset: usize) -> Result<u32, MetadataError> {
    let b = slice(data, offset, 4)?;
    Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PalmHeader {
    /// Database name, NUL padding removed. Calibre writes a mangled title here.
    pub name: String,
    pub record_offsets: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MobiHeader {
    pub encoding: TextEncoding,
    pub full_name: Option<String>,
    /// Absolute file offset of the EXTH block, when the header flags one.
    pub exth_offset: Option<usize>,
}

pub(super) fn parse_palm_header(data: &[u8]) -> Result<PalmHeader, MetadataError> {
    slice(data, 0, PALM_HEADER_LEN)?;

    let type_creator = &data[TYPE_CREATOR];
    if type_creator != b"BOOKMOBI" {
        return Err(MetadataError::NotMobi {
            found: String::from_utf8_lossy(type_creator).into_owned(),
        });
    }

    let name = TextEncoding::Cp1252.decode(&data[..PALM_NAME_LEN]);
    let count = read_u16(data, 76)? as usize;
    let mut record_offsets = Vec::with_capacity(count);
    for i in 0..count {
        let offset = read_u32(data, PALM_HEADER_LEN + i * RECORD_ENTRY_LEN)?;
        record_offsets.push(offset as usize);
    }

    Ok(PalmHeader {
        name,
        record_offsets,
    })
}

pub(super) fn parse_mobi_header(
    data: &[u8],
    palm: &PalmHeader,
) -> Result<MobiHeader, MetadataError> {
    let r0 = *palm.record_offsets.first().ok_or(MetadataError::NoRecords)?;

    if slice(data, r0 + MOBI_MAGIC_OFFSET, 4)? != b"MOBI" {
        return Err(MetadataError::MissingMobiHeader);
    }
    let header_len = read_u32(data, r0 + MOBI_HEADER_LEN_OFFSET)? as usize;
    let encoding = TextEncoding::from_code(read_u32(data, r0 + TEXT_ENCODING_OFFSET)?)?;

    // Short legacy headers stop before the full-name and EXTH fields.
    let covers = |field_end: usize| MOBI_MAGIC_OFFSET + header_len >= field_end;

    let full_name = if covers(FULL_NAME_LEN_OFFSET + 4) {
        let off = read_u32(data, r0 + FULL_NAME_OFFSET)? as usize;
        let len = read_u32(data, r0 + FULL_NAME_LEN_OFFSET)? as usize;
        if len == 0 {
            None
        } else {
            // Only a fallback title; a bad pointer is not worth failing the book over.
            slice(data, r0 + off, len).ok().map(|b| encoding.decode(b))
        }
    } else {
        None
    };

    let exth_offset = if covers(EXTH_FLAGS_OFFSET + 4)
        && read_u32(data, r0 + EXTH_FLAGS_OFFSET)? & EXTH_PRESENT != 0
    {
        Some(r0 + MOBI_MAGIC_OFFSET + header_len)
    } else {
        None
    };

    Ok(MobiHeader {
        encoding,
        full_name,
        exth_offset,
    })
}
