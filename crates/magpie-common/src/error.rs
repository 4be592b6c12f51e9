//! Errors produced while obtaining raw document content.

use thiserror::Error;

/// Failure to produce content from a file path or URL.
///
/// The parsing core never performs I/O itself; these errors surface from the
/// byte-source helpers in [`crate::net`] before a parse begins, and are
/// propagated to the caller without retries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Reading a local file failed.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Building the HTTP client or performing the request failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error: status {0}")]
    Status(u16),

    /// A `data:` URL could not be decoded.
    #[error("invalid data URL: {0}")]
    DataUrl(String),
}
