//! Pluggable text transcoding applied when text nodes are materialized.
//!
//! The tree stores text exactly as it appeared in the source, entities and
//! all. When a caller asks for the readable view, the document's transcoder
//! is applied once and the result cached. Only pass-through conversion ships
//! here; hosts needing real charset conversion supply their own impl.

use thiserror::Error;

/// A character-set conversion failed.
#[derive(Debug, Error)]
#[error("transcode failed: {0}")]
pub struct TranscodeError(pub String);

/// Converts raw source text into the form handed back to callers.
pub trait Transcoder {
    /// Convert one text run.
    ///
    /// # Errors
    ///
    /// Returns [`TranscodeError`] when the input cannot be represented in the
    /// target encoding.
    fn transcode(&self, raw: &str) -> Result<String, TranscodeError>;
}

/// The identity transcoder: text is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Transcoder for Passthrough {
    fn transcode(&self, raw: &str) -> Result<String, TranscodeError> {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_is_identity() {
        assert_eq!(Passthrough.transcode("&#x69; ümlaut").unwrap(), "&#x69; ümlaut");
    }
}
