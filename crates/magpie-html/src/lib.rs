//! Tolerant HTML scanning and parsing for the Magpie toolkit.
//!
//! # Scope
//!
//! This crate implements:
//! - **Content scanner** — a cursor over the raw character buffer with
//!   peeking, clamped seeking, delimiter-bounded copying (escape-aware),
//!   and token-class driven skipping. No HTML knowledge.
//! - **Input cleanup** — optional raw-text passes that normalize line
//!   endings and strip doctype/comment/CDATA noise, `<script>`/`<style>`
//!   blocks, and `{…}` smarty fragments.
//! - **Tree builder** — a tolerant parser producing a
//!   [`magpie_dom::Document`]: unclosed elements auto-close, bogus end
//!   tags are dropped, void elements self-close, and attribute values keep
//!   their quote style for byte-exact round trips.
//!
//! Malformed markup never fails a parse; only caller-imposed bounds
//! (empty input, `max_depth`, `strict`) do.

pub mod cleanup;
pub mod content;
pub mod error;
pub mod options;
pub mod parser;
pub mod token;

pub use content::Content;
pub use error::ParseError;
pub use options::Options;
pub use parser::{parse_str, Parser};
pub use token::StringToken;
