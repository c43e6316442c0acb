//! Cover URL construction from a template.

use super::CoverError;
use url::Url;

pub const ASIN_PLACEHOLDER: &str = "{asin}";

/// Substitutes `asin` into `template` and checks the result is an http(s) URL.
pub fn cover_url(template: &str, asin: &str) -> Result<Url, CoverError> {
    if !template.contains(ASIN_PLACEHOLDER) {
        return Err(CoverError::MissingPlaceholder(template.to_string()));
    }
    let raw = template.replace(ASIN_PLACEHOLDER, asin);
    let url = Url::parse(&raw).map_err(|source| CoverError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(CoverError::UnsupportedScheme(raw)),
    }
}
