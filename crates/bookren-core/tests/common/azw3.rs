//! Builds small but structurally valid AZW3 files for tests.

use std::path::{Path, PathBuf};

const EXTH_AUTHOR: u32 = 100;
const EXTH_ASIN: u32 = 113;
const EXTH_UPDATED_TITLE: u32 = 503;
const MOBI_HEADER_LEN: usize = 264;

#[derive(Debug, Clone, Default)]
pub struct BookSpec {
    pub title: String,
    pub authors: Vec<String>,
    pub asin: String,
}

impl BookSpec {
    pub fn new(title: &str, authors: &[&str], asin: &str) -> Self {
        Self {
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            asin: asin.to_string(),
        }
    }
}

/// UTF-8 book with one PalmDB record holding the MOBI header and EXTH block,
/// plus a dummy second record like real files have.
pub fn build(spec: &BookSpec) -> Vec<u8> {
    let mut records: Vec<(u32, Vec<u8>)> = spec
        .authors
        .iter()
        .map(|a| (EXTH_AUTHOR, a.as_bytes().to_vec()))
        .collect();
    records.push((EXTH_UPDATED_TITLE, spec.title.as_bytes().to_vec()));
    records.push((EXTH_ASIN, spec.asin.as_bytes().to_vec()));

    let mut exth_body = Vec::new();
    for (kind, data) in &records {
        exth_body.extend_from_slice(&kind.to_be_bytes());
        exth_body.extend_from_slice(&((data.len() + 8) as u32).to_be_bytes());
        exth_body.extend_from_slice(data);
    }
    while exth_body.len() % 4 != 0 {
        exth_body.push(0);
    }
    let mut exth = b"EXTH".to_vec();
    exth.extend_from_slice(&((exth_body.len() + 12) as u32).to_be_bytes());
    exth.extend_from_slice(&(records.len() as u32).to_be_bytes());
    exth.extend_from_slice(&exth_body);

    let full_name = spec.title.as_bytes();
    let mut mobi = vec![0u8; MOBI_HEADER_LEN];
    mobi[0..4].copy_from_slice(b"MOBI");
    mobi[4..8].copy_from_slice(&(MOBI_HEADER_LEN as u32).to_be_bytes());
    mobi[8..12].copy_from_slice(&2u32.to_be_bytes());
    mobi[12..16].copy_from_slice(&65001u32.to_be_bytes());
    mobi[20..24].copy_from_slice(&8u32.to_be_bytes());
    let full_name_offset = 16 + MOBI_HEADER_LEN + exth.len();
    mobi[68..72].copy_from_slice(&(full_name_offset as u32).to_be_bytes());
    mobi[72..76].copy_from_slice(&(full_name.len() as u32).to_be_bytes());
    mobi[112..116].copy_from_slice(&0x50u32.to_be_bytes());

    let mut record0 = vec![0u8; 16];
    record0[0..2].copy_from_slice(&1u16.to_be_bytes());
    record0.extend_from_slice(&mobi);
    record0.extend_from_slice(&exth);
    record0.extend_from_slice(full_name);
    record0.extend_from_slice(&[0, 0, 0, 0]);

    let record_count = 2usize;
    let r0 = 78 + record_count * 8 + 2;
    let r1 = r0 + record0.len();

    let mut data = vec![0u8; 78];
    let palm_name = b"Test_Book";
    data[..palm_name.len()].copy_from_slice(palm_name);
    data[60..68].copy_from_slice(b"BOOKMOBI");
    data[76..78].copy_from_slice(&(record_count as u16).to_be_bytes());
    for (i, offset) in [r0, r1].into_iter().enumerate() {
        data.extend_from_slice(&(offset as u32).to_be_bytes());
        data.extend_from_slice(&[0, 0, 0, (i * 2) as u8]);
    }
    data.extend_from_slice(&[0, 0]);
    data.extend_from_slice(&record0);
    data.extend_from_slice(b"text record");
    data
}

/// Writes a book to `dir/file_name` and returns its path.
pub fn write(dir: &Path, file_name: &str, spec: &BookSpec) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, build(spec)).expect("write test book");
    path
}
