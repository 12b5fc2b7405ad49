//! DOM Tree (arena-based allocation)
//!
//! All nodes of a document live in one `Vec<Node>`. Detached nodes stay in the
//! arena until the tree is dropped, so a [`NodeId`] never dangles.

use crate::{
    Attribute, AttributeList, DomError, DomResult, ElementData, InternedString, Node, NodeData,
    NodeId, NodeKind, StringInterner,
};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding a single document node
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(NodeData::Document));
        Self {
            nodes,
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Mutable access to a node. Links stay owned by the tree; only the
    /// payload can change through this reference.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Like [`get`](Self::get), failing with [`DomError::NotFound`]
    pub fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(DomError::NotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node is allocated on construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Resolve an interned tag identifier
    pub fn resolve(&self, tag: InternedString) -> &str {
        self.interner.get(tag)
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    /// Allocate a standalone node
    pub fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached HTML element; the tag name is lower-cased
    pub fn create_element(&mut self, name: &str) -> NodeId {
        let name = name.to_ascii_lowercase();
        self.create_element_ns(&name, None)
    }

    /// Create a detached element keeping the name as given
    pub fn create_element_ns(&mut self, name: &str, namespace: Option<&str>) -> NodeId {
        let tag = self.interner.intern(name);
        let mut element = ElementData::new(name, tag);
        element.namespace = namespace.map(str::to_string);
        self.alloc(NodeData::Element(element))
    }

    /// Create a detached text node; `text` is stored verbatim
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Comment(text.to_string()))
    }

    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(NodeData::Doctype {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        })
    }

    pub fn create_error(&mut self, message: &str) -> NodeId {
        self.alloc(NodeData::Error(message.to_string()))
    }

    /// Iterate over the direct children of `id`, all kinds
    pub fn children_of(&self, id: NodeId) -> ChildNodes<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        ChildNodes { tree: self, next }
    }

    /// True when `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node.get();
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(Node::parent);
        }
        false
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current position first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference`, or at the end when
    /// `reference` is `None`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        self.check_insert(parent, child)?;
        if let Some(reference) = reference {
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
            if reference == child {
                return Ok(());
            }
        }

        self.detach(child);

        let next = reference.unwrap_or(NodeId::NONE);
        let prev = match reference {
            Some(r) => self.nodes[r.index()].prev_sibling,
            None => self.nodes[parent.index()].last_child,
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }

        tracing::trace!(%parent, %child, "linked child");
        Ok(())
    }

    /// Detach `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest {
                node: child,
                target: parent,
            });
        }
        Ok(())
    }

    /// Unlink `id` from its parent and siblings. No-op when already detached.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    // ---------------------------------------------------------------------
    // Attribute store access
    // ---------------------------------------------------------------------

    /// Attribute list of an element; `None` for other kinds
    pub fn attributes(&self, id: NodeId) -> Option<&AttributeList> {
        self.get(id).and_then(Node::attributes)
    }

    pub fn attributes_mut(&mut self, id: NodeId) -> DomResult<&mut AttributeList> {
        let node = self.node_mut(id)?;
        let actual = node.kind();
        node.as_element_mut()
            .map(|e| &mut e.attrs)
            .ok_or(DomError::InvalidNodeType {
                expected: NodeKind::Element,
                actual,
            })
    }

    pub fn get_attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attributes(id).and_then(|a| a.get(key))
    }

    pub fn get_attribute_ns(&self, id: NodeId, namespace: Option<&str>, key: &str) -> Option<&str> {
        self.attributes(id).and_then(|a| a.get_ns(namespace, key))
    }

    pub fn has_attribute(&self, id: NodeId, key: &str) -> bool {
        self.attributes(id).is_some_and(|a| a.has(key))
    }

    pub fn has_attributes(&self, id: NodeId) -> bool {
        self.attributes(id).is_some_and(|a| !a.is_empty())
    }

    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: &str) -> DomResult<()> {
        self.attributes_mut(id)?.set(key, value);
        Ok(())
    }

    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        namespace: Option<&str>,
        key: &str,
        value: &str,
    ) -> DomResult<()> {
        self.attributes_mut(id)?.set_ns(namespace, key, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, key: &str) -> DomResult<Option<Attribute>> {
        Ok(self.attributes_mut(id)?.remove(key))
    }

    pub fn has_class(&self, id: NodeId, token: &str) -> bool {
        self.attributes(id).is_some_and(|a| a.has_class(token))
    }

    pub fn add_class(&mut self, id: NodeId, token: &str) -> DomResult<()> {
        self.attributes_mut(id)?.add_class(token);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, token: &str) -> DomResult<()> {
        self.attributes_mut(id)?.remove_class(token);
        Ok(())
    }

    pub fn toggle_class(&mut self, id: NodeId, token: &str) -> DomResult<bool> {
        Ok(self.attributes_mut(id)?.toggle_class(token))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the direct children of a node
#[derive(Debug, Clone)]
pub struct ChildNodes<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for ChildNodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next.get()?;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children(tree: &DomTree, id: NodeId) -> Vec<NodeId> {
        tree.children_of(id).collect()
    }

    #[test]
    fn test_new_tree_has_document_root() {
        let tree = DomTree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.node(tree.root()).unwrap().is_document());
    }

    #[test]
    fn test_append_links_siblings() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("UL");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        tree.append_child(tree.root(), ul).unwrap();
        tree.append_child(ul, a).unwrap();
        tree.append_child(ul, b).unwrap();

        assert_eq!(tree.node(ul).unwrap().data_str(), "ul");
        assert_eq!(children(&tree, ul), vec![a, b]);
        let ul_node = tree.node(ul).unwrap();
        assert_eq!(ul_node.first_child(), Some(a));
        assert_eq!(ul_node.last_child(), Some(b));
        assert_eq!(tree.node(a).unwrap().next_sibling(), Some(b));
        assert_eq!(tree.node(b).unwrap().prev_sibling(), Some(a));
    }

    #[test]
    fn test_insert_before_reference() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("div");
        let a = tree.create_text("a");
        let c = tree.create_text("c");
        let b = tree.create_text("b");
        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, c).unwrap();
        tree.insert_before(parent, b, Some(c)).unwrap();
        assert_eq!(children(&tree, parent), vec![a, b, c]);

        tree.insert_before(parent, c, Some(a)).unwrap();
        assert_eq!(children(&tree, parent), vec![c, a, b]);
        assert_eq!(tree.node(parent).unwrap().last_child(), Some(b));
    }

    #[test]
    fn test_remove_child_relinks() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("div");
        let ids: Vec<_> = (0..3).map(|_| tree.create_element("p")).collect();
        for &id in &ids {
            tree.append_child(parent, id).unwrap();
        }
        tree.remove_child(parent, ids[1]).unwrap();
        assert_eq!(children(&tree, parent), vec![ids[0], ids[2]]);
        assert!(tree.node(ids[1]).unwrap().is_detached());

        let err = tree.remove_child(parent, ids[1]).unwrap_err();
        assert!(matches!(err, DomError::NotAChild { .. }));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        tree.append_child(outer, inner).unwrap();

        assert!(matches!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            tree.append_child(outer, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn test_move_between_parents() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div");
        let second = tree.create_element("div");
        let child = tree.create_element("span");
        tree.append_child(first, child).unwrap();
        tree.append_child(second, child).unwrap();

        assert!(!tree.node(first).unwrap().has_children());
        assert_eq!(children(&tree, second), vec![child]);
        assert_eq!(tree.node(child).unwrap().parent(), Some(second));
    }

    #[test]
    fn test_attribute_helpers_reject_non_elements() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        let err = tree.set_attribute(text, "id", "a").unwrap_err();
        assert!(matches!(
            err,
            DomError::InvalidNodeType {
                expected: NodeKind::Element,
                actual: NodeKind::Text
            }
        ));
        assert_eq!(tree.get_attribute(text, "id"), None);
    }
}
