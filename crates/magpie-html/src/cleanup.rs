//! Raw-text cleanup passes applied before tokenization.
//!
//! These run over the input string, gated by [`Options::cleanup_input`],
//! and mirror a scraping-oriented preprocessing profile: normalize line
//! endings, drop doctype/comment/CDATA noise, and optionally strip whole
//! `<script>`/`<style>` blocks and `{…}` smarty template fragments. Every
//! pass is best-effort and tolerant — an unterminated block is left in
//! place rather than erroring.

use crate::options::Options;

/// Run the configured cleanup passes over `input`.
#[must_use]
pub fn clean(input: &str, options: &Options) -> String {
    if !options.cleanup_input {
        return input.to_string();
    }

    let mut text = trim_space_before_tag_close(input);
    text = normalize_line_breaks(&text, options.preserve_line_breaks);
    text = strip_delimited(&text, "<!doctype", ">");
    text = strip_delimited(&text, "<!--", "-->");
    text = strip_delimited(&text, "<![CDATA[", "]]>");
    if options.remove_scripts {
        text = strip_container(&text, "script");
    }
    if options.remove_styles {
        text = strip_container(&text, "style");
    }
    if options.remove_smarty_scripts {
        text = strip_smarty(&text);
    }
    text
}

/// Drop whitespace between a closing quote and the `>` that follows it
/// (`href="x" >` becomes `href="x">`).
fn trim_space_before_tag_close(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        out.push(ch);
        if ch == '"' || ch == '\'' {
            let mut lookahead = index + 1;
            while lookahead < chars.len() && chars[lookahead].is_ascii_whitespace() {
                lookahead += 1;
            }
            if lookahead > index + 1 && chars.get(lookahead) == Some(&'>') {
                index = lookahead;
                continue;
            }
        }
        index += 1;
    }
    out
}

/// Replace `\r\n`, `\r`, and `\n` with a space (or `&#10;` when line breaks
/// are preserved).
fn normalize_line_breaks(input: &str, preserve: bool) -> String {
    let replacement = if preserve { "&#10;" } else { " " };
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    let _ = chars.next();
                }
                out.push_str(replacement);
            }
            '\n' => out.push_str(replacement),
            other => out.push(other),
        }
    }
    out
}

/// Remove every `open … close` region (case-insensitive `open`). A region
/// with no terminator is left untouched.
fn strip_delimited(input: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut from = 0;
    while let Some(start) = find_ci(input, open, from) {
        out.push_str(&input[from..start]);
        match find_ci(input, close, start + open.len()) {
            Some(end) => from = end + close.len(),
            None => {
                // unterminated: keep it verbatim
                out.push_str(&input[start..]);
                return out;
            }
        }
    }
    out.push_str(&input[from..]);
    out
}

/// Remove `<name …>…</name>` containers wholesale (case-insensitive).
/// Self-closed `<name />` tags and containers with no closing tag are left
/// in place.
fn strip_container(input: &str, name: &str) -> String {
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut out = String::with_capacity(input.len());
    let mut from = 0;
    while let Some(start) = find_ci(input, &open, from) {
        out.push_str(&input[from..start]);
        from = start;

        // the tag name must actually end here
        let after = input[start + open.len()..].chars().next();
        let tag_ends = matches!(after, Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace());
        let open_end = input[start..].find('>').map(|i| start + i);
        let (Some(open_end), true) = (open_end, tag_ends) else {
            out.push_str(&input[start..start + open.len()]);
            from = start + open.len();
            continue;
        };

        if input[..open_end].ends_with('/') {
            // self-closed, nothing to strip
            out.push_str(&input[start..=open_end]);
            from = open_end + 1;
            continue;
        }

        let Some(close_start) = find_ci(input, &close, open_end + 1) else {
            out.push_str(&input[start..=open_end]);
            from = open_end + 1;
            continue;
        };
        let Some(close_end) = input[close_start..].find('>').map(|i| close_start + i) else {
            out.push_str(&input[start..=open_end]);
            from = open_end + 1;
            continue;
        };
        from = close_end + 1;
    }
    out.push_str(&input[from..]);
    out
}

/// Remove `{word…}` smarty fragments: `{` directly followed by a word
/// character, non-greedy to the next `}`. No nesting, no escapes — a
/// best-effort heuristic, and unterminated fragments stay put.
fn strip_smarty(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('{') {
        let opens_fragment = rest[start + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if !opens_fragment {
            out.push_str(&rest[..=start]);
            rest = &rest[start + 1..];
            continue;
        }
        match rest[start..].find('}') {
            Some(offset) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + offset + 1..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte-wise case-insensitive substring search. All needles used here open
/// with an ASCII character, so match indices always fall on character
/// boundaries.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() || from > h.len() - n.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_and_styles() {
        let options = Options::default();
        let html = "<div><script type=\"text/javascript\">var x = '<p>';</script>\
                    <style>.a { color: red; }</style>ok</div>";
        assert_eq!(clean(html, &options), "<div>ok</div>");
    }

    #[test]
    fn keeps_scripts_when_disabled() {
        let options = Options::default().set_remove_scripts(false).set_remove_styles(false);
        let html = "<script>var x = 1;</script>";
        assert_eq!(clean(html, &options), html);
    }

    #[test]
    fn strips_doctype_and_comments() {
        let options = Options::default();
        let html = "<!DOCTYPE html><!-- note --><p>hi</p>";
        assert_eq!(clean(html, &options), "<p>hi</p>");
    }

    #[test]
    fn smarty_fragments_need_a_word_character() {
        let options = Options::default();
        assert_eq!(clean("aa={123} b", &options), "aa= b");
        // bare braces are not smarty fragments
        assert_eq!(clean("x { } y", &options), "x { } y");
        // unterminated fragments stay put
        assert_eq!(clean("x {abc", &options), "x {abc");
    }

    #[test]
    fn line_breaks_become_spaces() {
        let options = Options::default();
        assert_eq!(clean("a\r\nb\rc\nd", &options), "a b c d");
    }

    #[test]
    fn line_breaks_can_be_preserved() {
        let options = Options::default().set_preserve_line_breaks(true);
        assert_eq!(clean("a\nb", &options), "a&#10;b");
    }

    #[test]
    fn unterminated_script_is_left_alone() {
        let options = Options::default();
        let html = "<div><script>var x = 1;</div>";
        assert_eq!(clean(html, &options), html);
    }

    #[test]
    fn cleanup_can_be_disabled_entirely() {
        let options = Options::default().set_cleanup_input(false);
        let html = "<!-- kept -->\n<script>kept</script>";
        assert_eq!(clean(html, &options), html);
    }
}
