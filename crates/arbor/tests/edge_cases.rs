//! Edge case tests for the arbor document handle

use arbor::dom::DomError;
use arbor::select::SelectorError;
use arbor::{Document, DocumentOptions, Error, Position};

#[test]
fn test_empty_document() {
    let doc = Document::parse("").unwrap();
    assert!(doc.document_element().is_some());
    assert!(doc.head().is_some());
    assert!(doc.body().is_some());
    assert_eq!(doc.title(), None);
    assert_eq!(doc.all().len(), 3);
}

#[test]
fn test_invalid_selector_error() {
    let doc = Document::parse("<p>x</p>").unwrap();
    let err = doc.query_selector_all("p[").unwrap_err();
    assert!(matches!(err, Error::Selector(SelectorError::UnexpectedEnd { .. })));
    assert!(matches!(
        doc.query_selector("").unwrap_err(),
        Error::Selector(SelectorError::Empty)
    ));
}

#[test]
fn test_query_selector_excludes_document_node() {
    let doc = Document::parse("<p>x</p>").unwrap();
    assert!(!doc.query_selector_all("*").unwrap().contains(doc.root()));
    assert_eq!(doc.query_selector("*").unwrap(), doc.document_element());
}

#[test]
fn test_adjacent_html_on_detached_element() {
    let mut doc = Document::parse("").unwrap();
    let lone = doc.create_element("div");
    let err = doc
        .insert_adjacent_html(Position::AfterEnd, lone, "<p>x</p>")
        .unwrap_err();
    assert!(matches!(err, Error::Dom(DomError::NoParent(_))));
}

#[test]
fn test_error_display_is_transparent() {
    let doc = Document::parse("").unwrap();
    let err = doc.query_selector_all("a:hover").unwrap_err();
    assert_eq!(err.to_string(), "unsupported pseudo-class :hover");
}

#[test]
fn test_title_whitespace_kept() {
    let doc = Document::parse("<title>  a  b </title>").unwrap();
    assert_eq!(doc.title().as_deref(), Some("  a  b "));
}

#[test]
fn test_option_defaults() {
    let options = DocumentOptions::default();
    assert!(options.parse.scripting_enabled);
    assert!(!options.serialize.pretty_print);
    assert!(options.cache.enabled);
}

#[test]
fn test_tag_name_of_non_element() {
    let mut doc = Document::parse("").unwrap();
    let text = doc.create_text_node("x");
    assert_eq!(doc.tag_name(text), None);
    assert_eq!(doc.local_name(text), None);
}
