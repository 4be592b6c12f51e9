//! Parse-level failures.
//!
//! Malformed markup itself never produces an error — the parser recovers
//! tolerantly. These variants cover caller-imposed bounds (`max_depth`,
//! empty input), opted-in strictness, and failures bubbling up from the
//! tree or the transcoder.

use magpie_common::encoding::TranscodeError;
use magpie_dom::DomError;
use thiserror::Error;

/// Errors returned while building a tree from markup.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input string was empty; there is nothing to build a tree from.
    #[error("cannot parse empty content")]
    ContentLengthEmpty,

    /// Element nesting went past the configured `max_depth` bound.
    #[error("markup nesting exceeded the configured limit of {0}")]
    DepthExceeded(usize),

    /// Strict mode was enabled and the input needed tolerant recovery.
    #[error("strict parse violation: {0}")]
    StrictViolation(String),

    /// The configured transcoder rejected a text run.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// A tree operation failed while building.
    #[error(transparent)]
    Dom(#[from] DomError),
}
