//! HTTP and file fetch utilities for the Magpie document loader.
//!
//! Provides simple blocking helpers that turn a path or URL into the raw
//! character content handed to the parser. The parsing core itself never
//! touches the filesystem or the network.

use base64::Engine;
use std::path::Path;
use std::time::Duration;

use crate::error::FetchError;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// The blocking HTTP client used by the fetch helpers. Exposed so callers
/// can build one with their own settings and pass it back in.
pub type HttpClient = reqwest::blocking::Client;

/// A parsed `data:` URL that can be decoded into raw bytes.
pub struct DataUrl {
    /// The full raw `data:` URL string (e.g. `data:text/html;base64,...`).
    pub raw_data: String,
}

impl DataUrl {
    /// Create a new `DataUrl` from a raw data URL string.
    #[must_use]
    pub const fn new(raw_data: String) -> Self {
        Self { raw_data }
    }

    /// Decode the data URL payload into raw bytes.
    ///
    /// Currently supports base64-encoded data URLs only.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if the URL is malformed or uses an
    /// encoding other than base64.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        let data_url = self.raw_data.trim_start_matches("data:");
        let (metadata, data) = match data_url.find(',') {
            Some(i) => (&data_url[..i], &data_url[i + 1..]),
            None => return Err(FetchError::DataUrl("missing comma".to_string())),
        };

        if metadata.ends_with(";base64") {
            base64::engine::general_purpose::STANDARD
                .decode(data)
                .map_err(|e| FetchError::DataUrl(format!("base64 decode error: {e}")))
        } else {
            Err(FetchError::DataUrl(format!(
                "unrecognized encoding: {metadata}"
            )))
        }
    }
}

/// Read a local file and return its content as text.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be read.
pub fn load_file(path: impl AsRef<Path>) -> Result<String, FetchError> {
    Ok(std::fs::read_to_string(path)?)
}

/// Fetch a URL and return its body as text.
///
/// `data:` URLs are decoded locally; everything else goes through a blocking
/// HTTP GET.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created, the request fails,
/// the response has a non-success status, or the body cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    if url.starts_with("data:") {
        let bytes = DataUrl::new(url.to_string()).decode()?;
        return String::from_utf8(bytes)
            .map_err(|e| FetchError::DataUrl(format!("payload is not UTF-8: {e}")));
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;
    fetch_text_with_client(url, &client)
}

/// Like [`fetch_text`], but on a caller-supplied client (custom proxy,
/// cookie store, timeouts). `data:` URLs are still decoded locally.
///
/// # Errors
///
/// Returns an error if the request fails, the response has a non-success
/// status, or the body cannot be decoded.
pub fn fetch_text_with_client(url: &str, client: &HttpClient) -> Result<String, FetchError> {
    if url.starts_with("data:") {
        let bytes = DataUrl::new(url.to_string()).decode()?;
        return String::from_utf8(bytes)
            .map_err(|e| FetchError::DataUrl(format!("payload is not UTF-8: {e}")));
    }

    let response = client.get(url).header("User-Agent", USER_AGENT).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    Ok(response.text()?)
}

/// Fetch a URL and return its body as raw bytes.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created, the request fails,
/// the response has a non-success status, or the body cannot be read.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    if url.starts_with("data:") {
        return DataUrl::new(url.to_string()).decode();
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;

    let response = client.get(url).header("User-Agent", USER_AGENT).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status().as_u16()));
    }

    Ok(response.bytes()?.to_vec())
}
