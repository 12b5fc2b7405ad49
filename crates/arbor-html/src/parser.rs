//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the result into an arena
//! [`DomTree`]. Fragment parsing goes through the same conversion, leaving the
//! new nodes detached in the caller's tree.

use arbor_dom::markup::FragmentParser;
use arbor_dom::{BoxError, DomTree, NodeData, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{LocalName, Namespace, ParseOpts, QualName, parse_document, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use serde::{Deserialize, Serialize};

use crate::{ParseError, ParseResult};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Parse `<noscript>` content as raw text, as a browser with scripting does
    pub scripting_enabled: bool,
    /// Skip text nodes that hold only whitespace
    pub drop_whitespace_text: bool,
    /// Treat the input as an `iframe srcdoc` document
    pub iframe_srcdoc: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            scripting_enabled: true,
            drop_whitespace_text: false,
            iframe_srcdoc: false,
        }
    }
}

impl ParseOptions {
    fn html5ever_opts(&self) -> ParseOpts {
        ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: self.scripting_enabled,
                iframe_srcdoc: self.iframe_srcdoc,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a complete document
    pub fn parse(&self, html: &str) -> ParseResult<DomTree> {
        tracing::debug!(bytes = html.len(), "parsing html document");

        let dom = parse_document(RcDom::default(), self.options.html5ever_opts())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut tree = DomTree::new();
        let root = tree.root();
        self.convert_children(&dom.document, &mut tree, root)?;

        tracing::debug!(nodes = tree.len(), "parsed html document");
        Ok(tree)
    }

    /// Parse `html` as the content of `context` and return the top-level
    /// nodes, detached, in source order.
    pub fn parse_fragment_into(
        &self,
        tree: &mut DomTree,
        html: &str,
        context: NodeId,
    ) -> ParseResult<Vec<NodeId>> {
        let context_name = context_name(tree, context);
        tracing::debug!(bytes = html.len(), context = %context_name.local, "parsing html fragment");

        let dom = parse_fragment(
            RcDom::default(),
            self.options.html5ever_opts(),
            context_name,
            Vec::new(),
            self.options.scripting_enabled,
        )
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

        // The fragment parser roots its output in a synthetic <html> element
        let Some(html_root) = dom.document.children.borrow().first().cloned() else {
            return Ok(Vec::new());
        };

        let mut nodes = Vec::new();
        for child in html_root.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree)? {
                nodes.push(id);
            }
        }
        Ok(nodes)
    }

    fn convert_children(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> ParseResult<()> {
        for child in handle.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree)? {
                tree.append_child(parent, id)?;
            }
        }
        Ok(())
    }

    /// Convert an RcDom subtree into a detached subtree of `tree`
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> ParseResult<Option<NodeId>> {
        let Some(root) = self.convert_single(handle, tree) else {
            return Ok(None);
        };

        let mut pending: Vec<(Handle, NodeId)> = vec![(handle.clone(), root)];
        while let Some((source, target)) = pending.pop() {
            for child in source.children.borrow().iter() {
                if let Some(id) = self.convert_single(child, tree) {
                    tree.append_child(target, id)?;
                    pending.push((child.clone(), id));
                }
            }
        }
        Ok(Some(root))
    }

    /// Allocate the node for `handle` alone, without children
    fn convert_single(&self, handle: &Handle, tree: &mut DomTree) -> Option<NodeId> {
        let id = match &handle.data {
            RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => return None,
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => tree.create_doctype(name, public_id, system_id),
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if self.options.drop_whitespace_text && text.trim().is_empty() {
                    return None;
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element_ns(&name.local, namespace_prefix(&name.ns));
                if let Some(element) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                    for attr in attrs.borrow().iter() {
                        let prefix = attr.name.prefix.as_ref().map(|p| p.to_string());
                        element.attrs.set_ns(prefix.as_deref(), &attr.name.local, &attr.value);
                    }
                }
                id
            }
        };
        Some(id)
    }
}

impl FragmentParser for HtmlParser {
    fn parse_fragment(
        &self,
        tree: &mut DomTree,
        markup: &str,
        context: NodeId,
    ) -> Result<Vec<NodeId>, BoxError> {
        self.parse_fragment_into(tree, markup, context)
            .map_err(|e: ParseError| Box::new(e) as BoxError)
    }
}

/// Element prefix stored on nodes for a parser namespace URL
fn namespace_prefix(ns: &Namespace) -> Option<&'static str> {
    match &**ns {
        SVG_NAMESPACE => Some("svg"),
        MATHML_NAMESPACE => Some("math"),
        _ => None,
    }
}

/// Qualified name of the fragment context. Anything but an element parses
/// as if inside `<body>`.
fn context_name(tree: &DomTree, context: NodeId) -> QualName {
    let (local, ns) = match tree.get(context).map(|n| &n.data) {
        Some(NodeData::Element(element)) => {
            let ns = match element.namespace.as_deref() {
                Some("svg") => SVG_NAMESPACE,
                Some("math") => MATHML_NAMESPACE,
                _ => HTML_NAMESPACE,
            };
            (element.name.as_str(), ns)
        }
        _ => ("body", HTML_NAMESPACE),
    };
    QualName::new(None, Namespace::from(ns), LocalName::from(local))
}
