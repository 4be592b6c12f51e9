//! Parse-time configuration.
//!
//! A plain record of feature flags, read once when a parse starts and
//! immutable for its duration. Serde derives let host programs load it from
//! their own config files.

use serde::{Deserialize, Serialize};

/// Elements that never take a closing tag, even when the source omits the
/// explicit `/>` marker.
///
/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
/// "Void elements only have a start tag; end tags must not be specified."
const DEFAULT_SELF_CLOSING: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "spacer", "track", "wbr",
];

/// Feature flags consumed by the parser and the input cleanup passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Master switch for the raw-text cleanup passes (line endings,
    /// doctype/comment/CDATA stripping, script/style/smarty removal).
    pub cleanup_input: bool,
    /// Strip `<script>…</script>` blocks during cleanup.
    pub remove_scripts: bool,
    /// Strip `<style>…</style>` blocks during cleanup.
    pub remove_styles: bool,
    /// Strip `{…}` smarty template fragments during cleanup. Best-effort:
    /// the fragment must open with `{` directly followed by a word
    /// character and runs to the next `}`; nesting and escapes are not
    /// understood.
    pub remove_smarty_scripts: bool,
    /// Keep whitespace-only runs as text nodes instead of discarding them.
    pub whitespace_text_node: bool,
    /// Collapse whitespace runs inside text nodes to a single space.
    pub remove_double_space: bool,
    /// Replace line breaks with `&#10;` instead of a space during cleanup.
    pub preserve_line_breaks: bool,
    /// Resolve character references in text nodes while building the tree.
    /// Costs round-trip fidelity; off by default.
    pub html_special_chars_decode: bool,
    /// Fail on markup the tolerant parser would otherwise paper over
    /// (dropped bogus end tags, elements auto-closed by an ancestor).
    pub strict: bool,
    /// Upper bound on element nesting. `None` means unbounded; exceeding a
    /// set bound fails the parse instead of recursing on.
    pub max_depth: Option<usize>,
    /// Tag names treated as void elements.
    pub self_closing: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cleanup_input: true,
            remove_scripts: true,
            remove_styles: true,
            remove_smarty_scripts: true,
            whitespace_text_node: true,
            remove_double_space: true,
            preserve_line_breaks: false,
            html_special_chars_decode: false,
            strict: false,
            max_depth: None,
            self_closing: DEFAULT_SELF_CLOSING.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Options {
    /// Fresh options with every default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the cleanup master switch.
    #[must_use]
    pub fn set_cleanup_input(mut self, value: bool) -> Self {
        self.cleanup_input = value;
        self
    }

    /// Toggle script stripping.
    #[must_use]
    pub fn set_remove_scripts(mut self, value: bool) -> Self {
        self.remove_scripts = value;
        self
    }

    /// Toggle style stripping.
    #[must_use]
    pub fn set_remove_styles(mut self, value: bool) -> Self {
        self.remove_styles = value;
        self
    }

    /// Toggle smarty fragment stripping.
    #[must_use]
    pub fn set_remove_smarty_scripts(mut self, value: bool) -> Self {
        self.remove_smarty_scripts = value;
        self
    }

    /// Toggle whitespace-only text nodes.
    #[must_use]
    pub fn set_whitespace_text_node(mut self, value: bool) -> Self {
        self.whitespace_text_node = value;
        self
    }

    /// Toggle whitespace collapsing inside text nodes.
    #[must_use]
    pub fn set_remove_double_space(mut self, value: bool) -> Self {
        self.remove_double_space = value;
        self
    }

    /// Toggle line-break preservation during cleanup.
    #[must_use]
    pub fn set_preserve_line_breaks(mut self, value: bool) -> Self {
        self.preserve_line_breaks = value;
        self
    }

    /// Toggle entity decoding in text nodes.
    #[must_use]
    pub fn set_html_special_chars_decode(mut self, value: bool) -> Self {
        self.html_special_chars_decode = value;
        self
    }

    /// Toggle strict parsing.
    #[must_use]
    pub fn set_strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    /// Bound element nesting depth.
    #[must_use]
    pub fn set_max_depth(mut self, value: Option<usize>) -> Self {
        self.max_depth = value;
        self
    }

    /// Whether `name` is configured as a void element.
    #[must_use]
    pub fn is_self_closing(&self, name: &str) -> bool {
        self.self_closing.iter().any(|tag| tag == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tolerant_profile() {
        let options = Options::default();
        assert!(options.cleanup_input);
        assert!(options.remove_scripts);
        assert!(options.whitespace_text_node);
        assert!(!options.strict);
        assert!(options.is_self_closing("br"));
        assert!(!options.is_self_closing("div"));
    }

    #[test]
    fn setters_chain() {
        let options = Options::new()
            .set_cleanup_input(false)
            .set_strict(true)
            .set_max_depth(Some(12));
        assert!(!options.cleanup_input);
        assert!(options.strict);
        assert_eq!(options.max_depth, Some(12));
    }
}
