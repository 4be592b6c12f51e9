//! The facade's aggregated error type.

use thiserror::Error;

/// Everything that can go wrong at the [`Dom`](crate::Dom) surface.
///
/// Loading failures come from the byte source and the parser; query
/// failures are typed so hosts handle them explicitly instead of indexing
/// past the end of a result list.
#[derive(Debug, Error)]
pub enum Error {
    /// A query or navigation call arrived before any document was loaded.
    #[error("no document has been loaded")]
    NotLoaded,

    /// `find` was asked for a match index past the end of the result list.
    #[error("no match at index {0}")]
    IndexNotFound(usize),

    /// The byte source could not produce content.
    #[error(transparent)]
    Fetch(#[from] magpie_common::FetchError),

    /// Parsing failed on a caller-imposed bound or in strict mode.
    #[error(transparent)]
    Parse(#[from] magpie_html::ParseError),

    /// The selector string could not be parsed.
    #[error(transparent)]
    Selector(#[from] magpie_select::SelectorError),

    /// A tree operation failed.
    #[error(transparent)]
    Dom(#[from] magpie_dom::DomError),
}
