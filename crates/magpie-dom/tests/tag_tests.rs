//! Tests for the tag/attribute model: quote styles, bare attributes,
//! replacing set semantics, markup rendering, style helpers.

use magpie_dom::{Attribute, AttributeQuote, DomError, Tag};

#[test]
fn test_self_closing() {
    let mut tag = Tag::new("a");
    tag.self_closing();
    assert!(tag.is_self_closing());
}

#[test]
fn test_set_attributes() {
    let mut tag = Tag::new("a");
    tag.set_attributes([(
        "href",
        Attribute::new(Some("http://google.com"), AttributeQuote::Single),
    )]);
    assert_eq!(
        tag.get_attribute("href").unwrap().value(),
        Some("http://google.com")
    );
}

#[test]
fn test_remove_attribute() {
    let mut tag = Tag::new("a");
    tag.set_attribute("href", Some("http://google.com"), AttributeQuote::Double);
    tag.remove_attribute("href");
    assert_eq!(
        tag.get_attribute("href").unwrap_err(),
        DomError::AttributeNotFound("href".to_string())
    );
}

#[test]
fn test_remove_all_attributes() {
    let mut tag = Tag::new("a");
    tag.set_attribute("href", Some("http://google.com"), AttributeQuote::Double);
    tag.set_attribute("class", Some("clear-fix"), AttributeQuote::Double);
    tag.remove_all_attributes();
    assert_eq!(tag.attributes().len(), 0);
}

#[test]
fn test_update_attributes() {
    let mut tag = Tag::new("a");
    tag.set_attributes([
        (
            "href",
            Attribute::new(Some("http://google.com"), AttributeQuote::Single),
        ),
        ("class", Attribute::new(None, AttributeQuote::Double)),
    ]);

    assert_eq!(tag.get_attribute("class").unwrap().value(), None);
    assert_eq!(
        tag.get_attribute("href").unwrap().value(),
        Some("http://google.com")
    );

    tag.set_attributes([
        (
            "href",
            Attribute::new(Some("https://www.google.com"), AttributeQuote::Double),
        ),
        (
            "class",
            Attribute::new(Some("funtimes"), AttributeQuote::Double),
        ),
    ]);
    assert_eq!(tag.get_attribute("class").unwrap().value(), Some("funtimes"));
    assert_eq!(
        tag.get_attribute("href").unwrap().value(),
        Some("https://www.google.com")
    );
    // updates never reorder: href was inserted first and stays first
    let names: Vec<&str> = tag.attributes().keys().map(String::as_str).collect();
    assert_eq!(names, ["href", "class"]);
}

#[test]
fn test_noise_payload() {
    let mut tag = Tag::new("a");
    tag.noise("noise");
    assert_eq!(tag.get_noise(), Some("noise"));
}

#[test]
fn test_make_opening_tag() {
    let mut tag = Tag::new("a");
    tag.set_attribute("href", Some("http://google.com"), AttributeQuote::Double);
    assert_eq!(tag.opening_html(), "<a href=\"http://google.com\">");
}

#[test]
fn test_make_opening_tag_bare_attribute() {
    let mut tag = Tag::new("a");
    tag.set_attribute("href", Some("http://google.com"), AttributeQuote::Double);
    tag.set_attribute("selected", None, AttributeQuote::Double);
    assert_eq!(tag.opening_html(), "<a href=\"http://google.com\" selected>");
}

#[test]
fn test_make_opening_tag_self_closing() {
    let mut tag = Tag::new("div");
    tag.self_closing();
    tag.set_attribute("class", Some("clear-fix"), AttributeQuote::Double);
    assert_eq!(tag.opening_html(), "<div class=\"clear-fix\" />");
}

#[test]
fn test_make_opening_tag_single_quote() {
    let mut tag = Tag::new("a");
    tag.set_attribute("href", Some("http://google.com"), AttributeQuote::Single);
    assert_eq!(tag.opening_html(), "<a href='http://google.com'>");
}

#[test]
fn test_make_closing_tag() {
    let tag = Tag::new("a");
    assert_eq!(tag.closing_html(), "</a>");
}

#[test]
fn test_make_closing_tag_self_closing() {
    let mut tag = Tag::new("div");
    tag.self_closing();
    assert!(tag.closing_html().is_empty());
}

#[test]
fn test_tag_name_is_lowercased() {
    let tag = Tag::new("DIV");
    assert_eq!(tag.name(), "div");
}

#[test]
fn test_attribute_name_case_is_preserved() {
    let mut tag = Tag::new("a");
    tag.set_attribute("data-Foo", Some("x"), AttributeQuote::Double);
    assert!(tag.has_attribute("data-Foo"));
    assert!(!tag.has_attribute("data-foo"));
}

#[test]
fn test_set_style_attribute_value() {
    let mut tag = Tag::new("div");
    tag.set_style_value("display", "none");
    assert_eq!(
        tag.get_attribute("style").unwrap().value(),
        Some("display:none;")
    );
}

#[test]
fn test_get_style_attribute_map() {
    let mut tag = Tag::new("div");
    tag.set_style_value("display", "none");
    tag.set_style_value("color", "red");

    let styles = tag.style_map();
    assert_eq!(styles.get("display").map(String::as_str), Some("none"));
    assert_eq!(styles.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_classes() {
    let mut tag = Tag::new("div");
    tag.set_attribute("class", Some("btn  active rounded"), AttributeQuote::Double);
    assert_eq!(tag.classes(), ["btn", "active", "rounded"]);
}
