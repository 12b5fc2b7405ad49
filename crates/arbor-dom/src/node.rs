//! DOM Node
//!
//! A node is its payload ([`NodeData`]) plus five structural links stored as
//! [`NodeId`] handles. Links are only ever rewritten by [`crate::DomTree`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AttributeList, InternedString, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: NodeId,
    pub(crate) first_child: NodeId,
    pub(crate) last_child: NodeId,
    pub(crate) prev_sibling: NodeId,
    pub(crate) next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a standalone node with no links
    pub fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Kind tag of this node
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.data, NodeData::Comment(_))
    }

    #[inline]
    pub fn is_doctype(&self) -> bool {
        matches!(self.data, NodeData::Doctype { .. })
    }

    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.data, NodeData::Error(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Interned tag identifier, elements only
    #[inline]
    pub fn tag(&self) -> Option<InternedString> {
        self.as_element().map(|e| e.tag)
    }

    /// Attribute list, elements only
    #[inline]
    pub fn attributes(&self) -> Option<&AttributeList> {
        self.as_element().map(|e| &e.attrs)
    }

    /// The node's data string: tag name, text, comment, doctype name or
    /// error message. Empty for the document node.
    pub fn data_str(&self) -> &str {
        match &self.data {
            NodeData::Document => "",
            NodeData::Doctype { name, .. } => name,
            NodeData::Element(e) => &e.name,
            NodeData::Text(s) | NodeData::Comment(s) | NodeData::Error(s) => s,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.get()
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child.get()
    }

    #[inline]
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child.get()
    }

    #[inline]
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling.get()
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling.get()
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_valid()
    }

    /// True when the node has no parent and no siblings
    #[inline]
    pub fn is_detached(&self) -> bool {
        !self.parent.is_valid() && !self.prev_sibling.is_valid() && !self.next_sibling.is_valid()
    }
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content, stored unescaped
    Text(String),
    /// Comment
    Comment(String),
    /// Parser error placeholder
    Error(String),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Document => NodeKind::Document,
            NodeData::Doctype { .. } => NodeKind::Doctype,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
            NodeData::Error(_) => NodeKind::Error,
        }
    }
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name, lower case for HTML elements
    pub name: String,
    /// Interned tag identifier
    pub tag: InternedString,
    /// Foreign-content namespace (`svg`, `math`), `None` for HTML
    pub namespace: Option<String>,
    /// Attributes in source order
    pub attrs: AttributeList,
}

impl ElementData {
    pub fn new(name: impl Into<String>, tag: InternedString) -> Self {
        Self {
            name: name.into(),
            tag,
            namespace: None,
            attrs: AttributeList::new(),
        }
    }
}

/// Mutually exclusive node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Doctype,
    Document,
    Error,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Element => "element",
            NodeKind::Text => "text",
            NodeKind::Comment => "comment",
            NodeKind::Doctype => "doctype",
            NodeKind::Document => "document",
            NodeKind::Error => "error",
        };
        f.write_str(name)
    }
}
