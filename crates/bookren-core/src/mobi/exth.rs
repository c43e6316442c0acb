//! EXTH record block: `EXTH`, header length, record count, then
//! `(type u32, length u32, data)` records whose length includes the 8-byte prefix.

use super::header::{read_u32, slice};
use super::MetadataError;

pub const EXTH_AUTHOR: u32 = 100;
pub const EXTH_ASIN: u32 = 113;
pub const EXTH_UPDATED_TITLE: u32 = 503;
pub const EXTH_ASIN_ALT: u32 = 504;

const RECORD_PREFIX_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ExthRecord<'a> {
    pub kind: u32,
    pub data: &'a [u8],
}

pub(super) fn parse_exth(data: &[u8], offset: usize) -> Result<Vec<ExthRecord<'_>>, MetadataError> {
    if slice(data, offset, 4)? != b"EXTH" {
        return Err(MetadataError::MalformedExth(format!(
            "missing magic at offset {}",
            offset
        )));
    }
    let count = read_u32(data, offset + 8)? as usize;

    let mut pos = offset + 12;
    // Count comes from the file; don't trust it for the allocation.
    let mut records = Vec::with_capacity(count.min(64));
    for i in 0..count {
        let kind = read_u32(data, pos)?;
        let len = read_u32(data, pos + 4)? as usize;
        if len < RECORD_PREFIX_LEN {
            return Err(MetadataError::MalformedExth(format!(
                "record {} (type {}) declares length {}",
                i, kind, len
            )));
        }
        let body = slice(data, pos + RECORD_PREFIX_LEN, len - RECORD_PREFIX_LEN)?;
        records.push(ExthRecord { kind, data: body });
        pos += len;
    }
    Ok(records)
}
