//! Single-stream HTTP GET of a cover image.
//!
//! Writes the body to `<dest>.part` and renames it into place once the
//! transfer succeeded, so a failed fetch never leaves a truncated image
//! under the final name.

use super::CoverError;
use crate::config::CoverConfig;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Downloads `url` to `dest`. Returns the number of bytes written.
pub fn fetch_to_path(url: &Url, dest: &Path, settings: &CoverConfig) -> Result<u64, CoverError> {
    let part = part_path(dest);
    let mut file = File::create(&part)?;

    let result = download(url, &mut file, settings).and_then(|written| {
        file.sync_all()?;
        Ok(written)
    });
    drop(file);

    match result {
        Ok(written) => {
            fs::rename(&part, dest)?;
            tracing::debug!(url = %url, bytes = written, path = %dest.display(), "cover saved");
            Ok(written)
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(&part) {
                tracing::warn!(path = %part.display(), "could not remove partial cover: {}", rm);
            }
            Err(e)
        }
    }
}

fn download(url: &Url, out: &mut File, settings: &CoverConfig) -> Result<u64, CoverError> {
    let mut written = 0u64;
    let mut write_error: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str())?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(settings.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(settings.timeout_secs))?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match out.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(CoverError::Storage(e));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(CoverError::Http {
            url: url.to_string(),
            code,
        });
    }
    Ok(written)
}
