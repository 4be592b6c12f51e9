//! Tests for the cursor scanner: peeking, clamped seeks, delimiter-bounded
//! copying (escape-aware), and token-class skipping.

use magpie_html::{Content, StringToken};
use quickcheck_macros::quickcheck;

#[test]
fn test_peek() {
    let content = Content::new("abcde");
    assert_eq!(content.peek(), Some('a'));
}

#[test]
fn test_peek_at_offset() {
    let content = Content::new("abcde");
    assert_eq!(content.peek_at(3), Some('d'));
}

#[test]
fn test_fast_forward() {
    let mut content = Content::new("abcde");
    content.fast_forward(2);
    assert_eq!(content.peek(), Some('c'));
}

#[test]
fn test_rewind() {
    let mut content = Content::new("abcde");
    content.fast_forward(2).rewind(1);
    assert_eq!(content.peek(), Some('b'));
}

#[test]
fn test_rewind_negative_clamps_to_start() {
    let mut content = Content::new("abcde");
    content.fast_forward(2).rewind(100);
    assert_eq!(content.peek(), Some('a'));
}

#[test]
fn test_copy_until() {
    let mut content = Content::new("abcdeedcba");
    assert_eq!(content.copy_until("ed", false, false), "abcde");
}

#[test]
fn test_copy_until_char_set() {
    let mut content = Content::new("abcdeedcba");
    assert_eq!(content.copy_until("edc", true, false), "ab");
}

#[test]
fn test_copy_until_escape() {
    let mut content = Content::new("foo\\\"bar\"bax");
    assert_eq!(content.copy_until("\"", false, true), "foo\\\"bar");
}

#[test]
fn test_copy_until_not_found_returns_remainder() {
    let mut content = Content::new("foo\\\"bar\"bax");
    assert_eq!(content.copy_until("baz", false, false), "foo\\\"bar\"bax");
    assert!(content.is_at_end());
}

#[test]
fn test_copy_until_leaves_cursor_on_delimiter() {
    let mut content = Content::new("value\"rest");
    let _ = content.copy_until("\"", false, false);
    assert_eq!(content.peek(), Some('"'));
}

#[test]
fn test_copy_by_token_attr() {
    let mut content = Content::new("<a href=\"google.com\">");
    content.fast_forward(3);
    assert_eq!(
        content.copy_by_token(StringToken::Attr, true),
        "href=\"google.com\""
    );
}

#[test]
fn test_skip() {
    let mut content = Content::new("abcdefghijkl");
    content.skip("abcd");
    assert_eq!(content.peek(), Some('e'));
}

#[test]
fn test_skip_and_copy() {
    let mut content = Content::new("abcdefghijkl");
    assert_eq!(content.skip_and_copy("abcd"), "abcd");
}

#[test]
fn test_skip_by_token() {
    let mut content = Content::new(" b c");
    content.fast_forward(1);
    content.skip_by_token(StringToken::Blank);
    assert_eq!(content.peek(), Some('b'));
}

#[test]
fn test_token_class_names_render() {
    assert_eq!(StringToken::Blank.to_string(), "Blank");
    assert_eq!(StringToken::Attr.to_string(), "Attr");
}

// ========== properties ==========

#[quickcheck]
fn prop_fast_forward_reaches_the_nth_char(s: String, n: usize) -> bool {
    let chars: Vec<char> = s.chars().collect();
    let n = n % (chars.len() + 1);
    let mut content = Content::new(&s);
    content.fast_forward(n);
    content.peek() == chars.get(n).copied()
}

#[quickcheck]
fn prop_rewind_clamps_at_zero(s: String, k: usize, m: usize) -> bool {
    let len = s.chars().count();
    let k = k % (len + 1);
    let mut over = Content::new(&s);
    over.fast_forward(k).rewind(k + m);
    let mut exact = Content::new(&s);
    exact.fast_forward(k).rewind(k);
    over.peek() == exact.peek()
}

#[quickcheck]
fn prop_copy_until_missing_delimiter_returns_everything(s: String) -> bool {
    // '\u{1}' never appears in the generated string's place of interest
    let input: String = s.replace('\u{1}', "");
    let mut content = Content::new(&input);
    content.copy_until("\u{1}", false, false) == input
}

#[quickcheck]
fn prop_skip_then_peek_is_not_a_member(s: String) -> bool {
    let mut content = Content::new(&s);
    content.skip_by_token(StringToken::Blank);
    content.peek().is_none_or(|ch| !" \t\r\n".contains(ch))
}
