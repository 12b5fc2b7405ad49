//! HTML Serialization (innerHTML/outerHTML)
//!
//! Key features:
//! - innerHTML/outerHTML serialization
//! - Escaping of text and attribute values
//! - Void and raw-text element handling
//! - Optional indentation

use arbor_dom::markup::Serializer;
use arbor_dom::{DomTree, NodeData, NodeId};
use serde::{Deserialize, Serialize};

/// Void elements (no content, no end tag)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Raw text elements (content is written unescaped)
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serializer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    /// Put every nested element on its own indented line
    pub pretty_print: bool,
    /// Indentation unit used when pretty printing
    pub indent: String,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

/// HTML serializer
#[derive(Debug, Clone, Default)]
pub struct HtmlSerializer {
    options: SerializeOptions,
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SerializeOptions) -> Self {
        Self { options }
    }

    pub fn pretty() -> Self {
        Self::with_options(SerializeOptions {
            pretty_print: true,
            ..Default::default()
        })
    }

    pub fn options(&self) -> &SerializeOptions {
        &self.options
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        if self.is_raw_text(tree, node_id) {
            self.serialize_children_raw(tree, node_id, &mut output);
        } else {
            self.serialize_children(tree, node_id, &mut output, 0);
        }
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output, 0);
        output
    }

    fn is_raw_text(&self, tree: &DomTree, node_id: NodeId) -> bool {
        tree.get(node_id)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.namespace.is_none() && RAW_TEXT_ELEMENTS.contains(&e.name.as_str()))
    }

    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String, depth: usize) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output, depth);
            }
            NodeData::Element(elem) => {
                let tag = elem.name.as_str();
                let html = elem.namespace.is_none();
                let is_void = html && VOID_ELEMENTS.contains(&tag);

                self.newline(output, depth);

                output.push('<');
                output.push_str(tag);
                for attr in elem.attrs.iter() {
                    output.push(' ');
                    if let Some(ns) = &attr.namespace {
                        output.push_str(ns);
                        output.push(':');
                    }
                    output.push_str(&attr.key);
                    output.push_str("=\"");
                    escape_attribute(&attr.value, output);
                    output.push('"');
                }
                output.push('>');

                if is_void {
                    return;
                }

                if html && RAW_TEXT_ELEMENTS.contains(&tag) {
                    self.serialize_children_raw(tree, node_id, output);
                } else {
                    self.serialize_children(tree, node_id, output, depth + 1);
                    if self.options.pretty_print && node.has_children() {
                        output.push('\n');
                        self.indent(output, depth);
                    }
                }

                output.push_str("</");
                output.push_str(tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(text, output);
            }
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::Doctype { name, .. } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(name);
                output.push('>');
            }
            NodeData::Error(_) => {}
        }
    }

    fn newline(&self, output: &mut String, depth: usize) {
        if self.options.pretty_print && depth > 0 {
            output.push('\n');
            self.indent(output, depth);
        }
    }

    fn indent(&self, output: &mut String, depth: usize) {
        for _ in 0..depth {
            output.push_str(&self.options.indent);
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String, depth: usize) {
        for child_id in tree.children_of(parent_id) {
            self.serialize_node(tree, child_id, output, depth);
        }
    }

    fn serialize_children_raw(&self, tree: &DomTree, parent_id: NodeId, output: &mut String) {
        for child_id in tree.children_of(parent_id) {
            if let Some(NodeData::Text(text)) = tree.get(child_id).map(|n| &n.data) {
                output.push_str(text);
            }
        }
    }
}

impl Serializer for HtmlSerializer {
    fn render(&self, tree: &DomTree, node: NodeId) -> String {
        self.serialize_outer(tree, node)
    }

    fn render_children(&self, tree: &DomTree, node: NodeId) -> String {
        self.serialize_inner(tree, node)
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(c),
        }
    }
}

/// Utility: innerHTML of a node with default options
pub fn inner_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node_id)
}

/// Utility: outerHTML of a node with default options
pub fn outer_html(tree: &DomTree, node_id: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node_id)
}
