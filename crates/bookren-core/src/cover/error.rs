//! Cover fetch errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("cover URL template {0:?} has no {{asin}} placeholder")]
    MissingPlaceholder(String),

    #[error("invalid cover URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("cover URL {0} is not http(s)")]
    UnsupportedScheme(String),

    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),

    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },

    /// Writing or finalizing the image file failed. Not a network problem.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}
