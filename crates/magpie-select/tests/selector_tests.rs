//! Tests for selector evaluation against parsed documents: chaining,
//! document order, dedup, origin bounding, combinators, attribute
//! operators.

use magpie_dom::{Document, NodeId};
use magpie_html::{parse_str, Options};
use magpie_select::{query, Selector};

fn load(html: &str) -> Document {
    parse_str(html, &Options::default()).unwrap()
}

fn find(doc: &Document, origin: NodeId, selector: &str) -> Vec<NodeId> {
    query(doc, origin, &Selector::parse(selector).unwrap())
}

const FORUM: &str = "\
<div class=\"post-row\">\
<div><span class=\"post-user\"><font>VonBurgermeister</font></span></div>\
<div><span class=\"post-body\"><font>first</font></span></div>\
</div>\
<div class=\"post-row\">\
<div><span class=\"post-user\"><font>Second</font></span></div>\
</div>";

#[test]
fn test_chained_descendant_selector_in_document_order() {
    let doc = load(FORUM);
    let fonts = find(&doc, NodeId::ROOT, ".post-row div .post-user font");
    assert_eq!(fonts.len(), 2);
    assert_eq!(doc.text(fonts[0]), "VonBurgermeister");
    assert_eq!(doc.text(fonts[1]), "Second");
}

#[test]
fn test_descendant_results_are_deduplicated() {
    // the inner font is a descendant of both divs; it must appear once
    let doc = load("<div class=\"a\"><div class=\"b\"><font>x</font></div></div>");
    let fonts = find(&doc, NodeId::ROOT, "div font");
    assert_eq!(fonts.len(), 1);
}

#[test]
fn test_class_selector() {
    let doc = load(FORUM);
    let users = find(&doc, NodeId::ROOT, ".post-user");
    assert_eq!(users.len(), 2);
}

#[test]
fn test_id_selector() {
    let doc = load("<p id=\"first\">a</p><p id=\"second\">b</p>");
    let hits = find(&doc, NodeId::ROOT, "#second");
    assert_eq!(hits.len(), 1);
    assert_eq!(doc.text(hits[0]), "b");
}

#[test]
fn test_universal_selector_matches_elements_only() {
    let doc = parse_str(
        "<div>text<p>x</p><!-- c --></div>",
        &Options::default().set_cleanup_input(false),
    )
    .unwrap();
    let all = find(&doc, NodeId::ROOT, "*");
    assert_eq!(all.len(), 2); // div and p; text and comment are not elements
}

#[test]
fn test_compound_selector() {
    let doc = load("<a class=\"btn\">x</a><a class=\"btn\" id=\"go\">y</a>");
    let hits = find(&doc, NodeId::ROOT, "a.btn#go");
    assert_eq!(hits.len(), 1);
    assert_eq!(doc.text(hits[0]), "y");
}

#[test]
fn test_child_combinator() {
    let doc = load("<ul><li>direct</li><ol><li>nested</li></ol></ul>");
    let direct = find(&doc, NodeId::ROOT, "ul > li");
    assert_eq!(direct.len(), 1);
    assert_eq!(doc.text(direct[0]), "direct");

    let any = find(&doc, NodeId::ROOT, "ul li");
    assert_eq!(any.len(), 2);
}

#[test]
fn test_next_sibling_combinator() {
    let doc = load("<h1>t</h1><p>adjacent</p><p>not adjacent</p>");
    let hits = find(&doc, NodeId::ROOT, "h1 + p");
    assert_eq!(hits.len(), 1);
    assert_eq!(doc.text(hits[0]), "adjacent");
}

#[test]
fn test_next_sibling_skips_text_nodes() {
    let doc = load("<h1>t</h1> <p>adjacent</p>");
    let hits = find(&doc, NodeId::ROOT, "h1 + p");
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_subsequent_sibling_combinator() {
    let doc = load("<h1>t</h1><div>x</div><p>one</p><p>two</p>");
    let hits = find(&doc, NodeId::ROOT, "h1 ~ p");
    assert_eq!(hits.len(), 2);
}

#[test]
fn test_attribute_selectors() {
    let doc = load(
        "<a href=\"https://example.com/a.png\" lang=\"en-US\" class=\"big red\">x</a>\
         <a href=\"http://example.com\" disabled>y</a>",
    );
    assert_eq!(find(&doc, NodeId::ROOT, "[href]").len(), 2);
    assert_eq!(find(&doc, NodeId::ROOT, "[disabled]").len(), 1);
    assert_eq!(find(&doc, NodeId::ROOT, "[href=\"http://example.com\"]").len(), 1);
    assert_eq!(find(&doc, NodeId::ROOT, "[class~=red]").len(), 1);
    assert_eq!(find(&doc, NodeId::ROOT, "[lang|=en]").len(), 1);
    assert_eq!(find(&doc, NodeId::ROOT, "[href^=https]").len(), 1);
    assert_eq!(find(&doc, NodeId::ROOT, "[href$='.png']").len(), 1);
    assert_eq!(find(&doc, NodeId::ROOT, "[href*=example]").len(), 2);
}

#[test]
fn test_comma_group() {
    let doc = load("<b>1</b><i>2</i><u>3</u>");
    let hits = find(&doc, NodeId::ROOT, "b, u");
    assert_eq!(hits.len(), 2);
    assert_eq!(doc.text(hits[0]), "1");
    assert_eq!(doc.text(hits[1]), "3");
}

#[test]
fn test_query_is_bounded_at_the_origin() {
    let doc = load("<div class=\"outer\"><section><p>x</p></section></div>");
    let section = find(&doc, NodeId::ROOT, "section")[0];

    // from the section, "div p" must not match: the only div is above the
    // query origin
    assert!(find(&doc, section, "div p").is_empty());
    assert_eq!(find(&doc, section, "p").len(), 1);
}

#[test]
fn test_origin_itself_never_matches() {
    let doc = load("<div class=\"a\"><div class=\"a\">inner</div></div>");
    let outer = find(&doc, NodeId::ROOT, "div.a")[0];
    let hits = find(&doc, outer, "div.a");
    assert_eq!(hits.len(), 1);
    assert_eq!(doc.text(hits[0]), "inner");
}

#[test]
fn test_queries_reflect_mutations_immediately() {
    let mut doc = load("<div><p>x</p></div>");
    let p = find(&doc, NodeId::ROOT, "p")[0];
    doc.delete(p);
    assert!(find(&doc, NodeId::ROOT, "p").is_empty());
}
