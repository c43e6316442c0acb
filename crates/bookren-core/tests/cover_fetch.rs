//! Cover fetch against a local HTTP server.

mod common;

use bookren_core::config::{BookrenConfig, CoverConfig};
use bookren_core::cover::{cover_url, fetch_to_path, CoverError, CoverOutcome};
use bookren_core::process::{process_path, ProcessOptions};
use common::azw3::{self, BookSpec};
use std::fs;
use tempfile::tempdir;

fn jpeg_body() -> Vec<u8> {
    let mut body = vec![0xFF, 0xD8, 0xFF, 0xE0];
    body.extend((0u8..=255).cycle().take(32 * 1024));
    body.extend_from_slice(&[0xFF, 0xD9]);
    body
}

#[test]
fn fetch_writes_body_and_requests_asin_path() {
    let body = jpeg_body();
    let server = common::image_server::start(body.clone());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("Title.B01ABCDEFG - Jane Doe.jpg");

    let url = cover_url(&server.template(), "B01ABCDEFG").unwrap();
    let written = fetch_to_path(&url, &dest, &CoverConfig::default()).unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(fs::read(&dest).unwrap(), body);
    assert_eq!(server.requested_paths(), vec!["/images/P/B01ABCDEFG.jpg"]);
    let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
    assert_eq!(leftovers.len(), 1, "no .part file left behind");
}

#[test]
fn http_error_leaves_no_file() {
    let server = common::image_server::start_with_status(404, b"not here".to_vec());
    let dir = tempdir().unwrap();
    let dest = dir.path().join("cover.jpg");

    let url = cover_url(&server.template(), "B404").unwrap();
    let err = fetch_to_path(&url, &dest, &CoverConfig::default()).unwrap_err();

    match err {
        CoverError::Http { code, .. } => assert_eq!(code, 404),
        other => panic!("expected Http error, got {:?}", other),
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn pipeline_fetches_cover_when_none_is_local() {
    let body = jpeg_body();
    let server = common::image_server::start(body.clone());
    let dir = tempdir().unwrap();
    let book = azw3::write(
        dir.path(),
        "book.azw3",
        &BookSpec::new("Title", &["Doe, Jane"], "B01ABCDEFG"),
    );

    let mut cfg = BookrenConfig::default();
    cfg.cover_url_template = server.template();
    let opts = ProcessOptions::from_config(&cfg).with_cover_from(&cfg);

    let mut out = Vec::new();
    let report = process_path(&book, &opts, &mut out).unwrap().unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "# Title.B01ABCDEFG - Jane Doe\nFetching book cover...\ndone.\n"
    );
    let cover_path = dir.path().join("Title.B01ABCDEFG - Jane Doe.jpg");
    assert_eq!(
        report.cover,
        Some(CoverOutcome::Fetched {
            path: cover_path.clone(),
            bytes: body.len() as u64,
        })
    );
    assert_eq!(fs::read(cover_path).unwrap(), body);
}

#[test]
fn pipeline_cover_failure_propagates_after_book_rename() {
    let server = common::image_server::start_with_status(500, Vec::new());
    let dir = tempdir().unwrap();
    let book = azw3::write(
        dir.path(),
        "book.azw3",
        &BookSpec::new("Title", &["Jane Doe"], "B500"),
    );

    let mut cfg = BookrenConfig::default();
    cfg.cover_url_template = server.template();
    let mut opts = ProcessOptions::from_config(&cfg).with_cover_from(&cfg);
    opts.rename_opf = true;
    fs::write(dir.path().join("metadata.opf"), b"<package/>").unwrap();

    let mut out = Vec::new();
    let err = process_path(&book, &opts, &mut out).unwrap_err();

    assert!(format!("{:#}", err).contains("HTTP 500"));
    assert!(dir.path().join("Title.B500 - Jane Doe.azw3").exists());
    // the run stopped before the sidecar step
    assert!(dir.path().join("metadata.opf").exists());
    assert!(!dir.path().join("Title.B500 - Jane Doe.jpg").exists());
}
