//! Document handle
//!
//! Owns a parsed [`DomTree`] together with the parser, serializer and selector
//! cache it is used with.

use std::sync::Arc;

use arbor_dom::{Collection, DomTree, NodeId, Position, by_class, by_id, by_name, by_tag, find_all};
use arbor_html::{HtmlParser, HtmlSerializer};
use arbor_select::SelectorCache;

use crate::{DocumentOptions, Result};

/// A parsed HTML document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    parser: HtmlParser,
    serializer: HtmlSerializer,
    cache: Arc<SelectorCache>,
}

impl Document {
    /// Parse with default options and a private selector cache
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_with(html, DocumentOptions::default())
    }

    pub fn parse_with(html: &str, options: DocumentOptions) -> Result<Self> {
        let parser = HtmlParser::with_options(options.parse);
        let tree = parser.parse(html)?;
        tracing::info!(nodes = tree.len(), "document parsed");

        Ok(Self {
            tree,
            parser,
            serializer: HtmlSerializer::with_options(options.serialize),
            cache: Arc::new(SelectorCache::new(options.cache)),
        })
    }

    /// Use `cache` for selector queries, typically one shared between
    /// documents
    pub fn with_cache(mut self, cache: Arc<SelectorCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn cache(&self) -> &Arc<SelectorCache> {
        &self.cache
    }

    pub fn parser(&self) -> &HtmlParser {
        &self.parser
    }

    pub fn serializer(&self) -> &HtmlSerializer {
        &self.serializer
    }

    // ========================================================================
    // Well-known elements
    // ========================================================================

    /// The `<html>` element
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.first_element_child(self.root())
    }

    pub fn head(&self) -> Option<NodeId> {
        self.top_level("head")
    }

    pub fn body(&self) -> Option<NodeId> {
        self.top_level("body")
    }

    /// Text of the first `<title>` element
    pub fn title(&self) -> Option<String> {
        by_tag(&self.tree, self.root(), "title")
            .first()
            .map(|title| self.tree.text(title))
    }

    /// Every element in document order
    pub fn all(&self) -> Collection {
        find_all(&self.tree, self.root(), |_, node| node.is_element())
    }

    pub fn forms(&self) -> Collection {
        by_tag(&self.tree, self.root(), "form")
    }

    pub fn images(&self) -> Collection {
        by_tag(&self.tree, self.root(), "img")
    }

    /// `<a>` and `<area>` elements with an `href`
    pub fn links(&self) -> Collection {
        find_all(&self.tree, self.root(), |_, node| {
            matches!(node.as_element(), Some(e)
                if (e.name == "a" || e.name == "area") && e.attrs.has("href"))
        })
    }

    /// `<a>` elements with a `name`
    pub fn anchors(&self) -> Collection {
        find_all(&self.tree, self.root(), |_, node| {
            matches!(node.as_element(), Some(e) if e.name == "a" && e.attrs.has("name"))
        })
    }

    fn top_level(&self, tag: &str) -> Option<NodeId> {
        let html = self.document_element()?;
        self.tree.children(html).iter().find(|&child| {
            self.tree
                .get(child)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.name == tag)
        })
    }

    // ========================================================================
    // Creation and lookup
    // ========================================================================

    /// New detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.tree.create_element(name)
    }

    /// New detached text node
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        by_id(&self.tree, self.root(), id)
    }

    pub fn get_elements_by_tag_name(&self, tag: &str) -> Collection {
        by_tag(&self.tree, self.root(), tag)
    }

    pub fn get_elements_by_class_name(&self, class_name: &str) -> Collection {
        by_class(&self.tree, self.root(), class_name)
    }

    pub fn get_elements_by_name(&self, name: &str) -> Collection {
        by_name(&self.tree, self.root(), name)
    }

    /// First element matching `selector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(arbor_select::query_first(
            &self.tree,
            self.root(),
            selector,
            &self.cache,
        )?)
    }

    /// Every element matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Collection> {
        Ok(arbor_select::query_all(
            &self.tree,
            self.root(),
            selector,
            &self.cache,
        )?)
    }

    /// Whether `node` matches `selector`
    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool> {
        Ok(arbor_select::matches(&self.tree, node, selector, &self.cache)?)
    }

    // ========================================================================
    // Markup
    // ========================================================================

    pub fn inner_html(&self, node: NodeId) -> String {
        self.tree.inner_html(node, &self.serializer)
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        self.tree.outer_html(node, &self.serializer)
    }

    /// Render the whole document
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    pub fn set_inner_html(&mut self, node: NodeId, markup: &str) -> Result<()> {
        self.tree.set_inner_html(node, markup, &self.parser)?;
        Ok(())
    }

    pub fn insert_adjacent_html(
        &mut self,
        position: Position,
        pivot: NodeId,
        markup: &str,
    ) -> Result<()> {
        self.tree
            .insert_adjacent_html(position, pivot, markup, &self.parser)?;
        Ok(())
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// Upper-case tag name, as `Element.tagName` reports it for HTML elements
    pub fn tag_name(&self, node: NodeId) -> Option<String> {
        self.local_name(node).map(str::to_ascii_uppercase)
    }

    /// Tag name as stored
    pub fn local_name(&self, node: NodeId) -> Option<&str> {
        self.tree
            .get(node)
            .and_then(|n| n.as_element())
            .map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Hello &amp; welcome</title></head>
<body>
<form name="f"><input name="q"></form>
<a href="/x">x</a><a name="top">top</a><map><area href="/y"></map>
<img src="a.png"><img src="b.png">
<svg><foreignObject></foreignObject></svg>
</body></html>"#;

    #[test]
    fn test_well_known_elements() {
        let doc = Document::parse(PAGE).unwrap();
        let html = doc.document_element().unwrap();
        assert_eq!(doc.local_name(html), Some("html"));
        assert_eq!(doc.tree().parent(doc.head().unwrap()), Some(html));
        assert_eq!(doc.local_name(doc.body().unwrap()), Some("body"));
        assert_eq!(doc.title().as_deref(), Some("Hello & welcome"));
    }

    #[test]
    fn test_element_groups() {
        let doc = Document::parse(PAGE).unwrap();
        assert_eq!(doc.forms().len(), 1);
        assert_eq!(doc.images().len(), 2);
        assert_eq!(doc.links().len(), 2);
        assert_eq!(doc.anchors().len(), 1);
        assert_eq!(doc.get_elements_by_name("q").len(), 1);
        assert!(doc.all().iter().all(|n| doc.tree().is_element(n)));
    }

    #[test]
    fn test_names() {
        let doc = Document::parse(PAGE).unwrap();
        let body = doc.body().unwrap();
        assert_eq!(doc.tag_name(body).as_deref(), Some("BODY"));
        assert_eq!(doc.tag_name(doc.root()), None);

        let foreign = doc.get_elements_by_tag_name("foreignObject");
        assert_eq!(doc.local_name(foreign.first().unwrap()), Some("foreignObject"));
    }

    #[test]
    fn test_missing_title() {
        let doc = Document::parse("<p>x</p>").unwrap();
        assert_eq!(doc.title(), None);
    }
}
