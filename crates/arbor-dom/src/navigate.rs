//! Tree navigation
//!
//! Node-kind predicates and element-only traversal. Every walk follows the raw
//! parent/sibling links and skips nodes that are not elements.

use crate::{Collection, DomTree, Node, NodeId};

impl DomTree {
    #[inline]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    #[inline]
    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_text)
    }

    #[inline]
    pub fn is_comment(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_comment)
    }

    #[inline]
    pub fn is_doctype(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_doctype)
    }

    #[inline]
    pub fn is_document(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_document)
    }

    #[inline]
    pub fn is_error(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_error)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn has_child_nodes(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::has_children)
    }

    /// All direct children, every kind
    pub fn child_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.children_of(id).collect()
    }

    /// Direct children that are elements
    pub fn children(&self, id: NodeId) -> Collection {
        self.children_of(id).filter(|&c| self.is_element(c)).collect()
    }

    pub fn child_element_count(&self, id: NodeId) -> usize {
        self.children_of(id).filter(|&c| self.is_element(c)).count()
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children_of(id).find(|&c| self.is_element(c))
    }

    pub fn last_element_child(&self, id: NodeId) -> Option<NodeId> {
        let start = self.get(id).and_then(Node::last_child);
        self.walk(start, Node::prev_sibling).find(|&c| self.is_element(c))
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.next_siblings(id).find(|&c| self.is_element(c))
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.prev_siblings(id).find(|&c| self.is_element(c))
    }

    /// Nearest ancestor that is an element
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let start = self.parent(id);
        self.walk(start, Node::parent).find(|&p| self.is_element(p))
    }

    /// Every following sibling element, in document order
    pub fn next_element_siblings(&self, id: NodeId) -> Collection {
        self.next_siblings(id).filter(|&c| self.is_element(c)).collect()
    }

    /// Every preceding sibling element, nearest first
    pub fn previous_element_siblings(&self, id: NodeId) -> Collection {
        self.prev_siblings(id).filter(|&c| self.is_element(c)).collect()
    }

    /// Element children of the parent, `id` included. Empty when detached.
    pub fn sibling_elements(&self, id: NodeId) -> Collection {
        match self.parent(id) {
            Some(parent) => self.children(parent),
            None => Collection::new(),
        }
    }

    /// Follow `last_element_child` down as far as it goes; returns `id` itself
    /// when it has no element children.
    pub fn last_descendant(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(last) = self.last_element_child(current) {
            current = last;
        }
        current
    }

    /// Lazy preorder walk over the descendants of `root`, `root` excluded
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let next = self.get(root).map_or(NodeId::NONE, |n| n.first_child);
        Descendants {
            tree: self,
            root,
            next,
        }
    }

    fn next_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.get(id).and_then(Node::next_sibling);
        self.walk(start, Node::next_sibling)
    }

    fn prev_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.get(id).and_then(Node::prev_sibling);
        self.walk(start, Node::prev_sibling)
    }

    fn walk(
        &self,
        start: Option<NodeId>,
        step: fn(&Node) -> Option<NodeId>,
    ) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(start, move |&id| self.get(id).and_then(step))
    }
}

/// Preorder iterator over a subtree, see [`DomTree::descendants`]
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.get()?;
        self.next = self.successor(current);
        Some(current)
    }
}

impl Descendants<'_> {
    fn successor(&self, current: NodeId) -> NodeId {
        let Some(node) = self.tree.get(current) else {
            return NodeId::NONE;
        };
        if node.first_child.is_valid() {
            return node.first_child;
        }

        let mut id = current;
        while id != self.root {
            let Some(node) = self.tree.get(id) else {
                break;
            };
            if node.next_sibling.is_valid() {
                return node.next_sibling;
            }
            id = node.parent;
        }
        NodeId::NONE
    }
}
