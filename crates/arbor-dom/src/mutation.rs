//! Structural mutation
//!
//! Relative insertion, detachment, replacement, cloning and wrapping. Every
//! operation keeps the sibling chain and the parent's first/last handles in
//! step, and reports precondition violations as [`DomError`] values.

use serde::{Deserialize, Serialize};

use crate::{DomError, DomResult, DomTree, NodeId};

/// Insertion point relative to a pivot node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Before the pivot, as its previous sibling
    BeforeBegin,
    /// Inside the pivot, before its first child
    AfterBegin,
    /// Inside the pivot, after its last child
    BeforeEnd,
    /// After the pivot, as its next sibling
    AfterEnd,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::BeforeBegin => "beforebegin",
            Position::AfterBegin => "afterbegin",
            Position::BeforeEnd => "beforeend",
            Position::AfterEnd => "afterend",
        }
    }

    /// True for the two positions that need the pivot's parent
    pub fn is_outside(self) -> bool {
        matches!(self, Position::BeforeBegin | Position::AfterEnd)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DomTree {
    /// Insert `node` at `position` relative to `pivot`. A node attached
    /// elsewhere is moved.
    pub fn insert(&mut self, position: Position, pivot: NodeId, node: NodeId) -> DomResult<()> {
        let (parent, reference) = self.insertion_point(position, pivot)?;
        self.insert_before(parent, node, reference)?;
        tracing::trace!(%position, %pivot, %node, "inserted node");
        Ok(())
    }

    /// Resolve `position` around `pivot` to a parent and the child to insert
    /// before (`None` appends).
    pub(crate) fn insertion_point(
        &self,
        position: Position,
        pivot: NodeId,
    ) -> DomResult<(NodeId, Option<NodeId>)> {
        let pivot_node = self.node(pivot)?;
        let point = match position {
            Position::BeforeBegin => (self.parent_of(pivot)?, Some(pivot)),
            Position::AfterBegin => (pivot, pivot_node.first_child()),
            Position::BeforeEnd => (pivot, None),
            Position::AfterEnd => (self.parent_of(pivot)?, pivot_node.next_sibling()),
        };
        Ok(point)
    }

    fn parent_of(&self, id: NodeId) -> DomResult<NodeId> {
        self.node(id)?.parent().ok_or(DomError::NoParent(id))
    }

    pub fn before(&mut self, pivot: NodeId, node: NodeId) -> DomResult<()> {
        self.insert(Position::BeforeBegin, pivot, node)
    }

    pub fn prepend(&mut self, pivot: NodeId, node: NodeId) -> DomResult<()> {
        self.insert(Position::AfterBegin, pivot, node)
    }

    pub fn append(&mut self, pivot: NodeId, node: NodeId) -> DomResult<()> {
        self.insert(Position::BeforeEnd, pivot, node)
    }

    pub fn after(&mut self, pivot: NodeId, node: NodeId) -> DomResult<()> {
        self.insert(Position::AfterEnd, pivot, node)
    }

    /// Put `new` in the place of `old`, a child of `parent`, and detach `old`.
    ///
    /// Both nodes must be of the same kind. Returns a shallow clone of `old`
    /// taken before the mutation.
    pub fn replace(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> DomResult<NodeId> {
        let expected = self.node(old)?.kind();
        let actual = self.node(new)?.kind();
        if expected != actual {
            return Err(DomError::KindMismatch { expected, actual });
        }
        if self.node(old)?.parent != parent {
            return Err(DomError::NotAChild { parent, child: old });
        }

        let snapshot = self.clone_node(old)?;
        if new != old {
            self.insert_before(parent, new, Some(old))?;
            self.detach(old);
        }
        tracing::trace!(%parent, %new, %old, "replaced child");
        Ok(snapshot)
    }

    /// Detach `node` from its parent; no-op when already detached
    pub fn remove(&mut self, node: NodeId) -> DomResult<()> {
        if self.node(node)?.parent().is_some() {
            self.detach(node);
            tracing::trace!(%node, "removed node");
        }
        Ok(())
    }

    /// Detach every child of `node`, last first
    pub fn empty(&mut self, node: NodeId) -> DomResult<()> {
        while let Some(last) = self.node(node)?.last_child() {
            self.detach(last);
        }
        Ok(())
    }

    /// Shallow copy: kind, tag, data and attributes; no children, no links
    pub fn clone_node(&mut self, node: NodeId) -> DomResult<NodeId> {
        let data = self.node(node)?.data.clone();
        Ok(self.alloc(data))
    }

    /// Recursive copy of `node` and its descendants as a new standalone root
    pub fn clone_deep(&mut self, node: NodeId) -> DomResult<NodeId> {
        let copy = self.clone_node(node)?;
        let mut pending = vec![(node, copy)];
        while let Some((source, target)) = pending.pop() {
            let children: Vec<NodeId> = self.children_of(source).collect();
            for child in children {
                let child_copy = self.clone_node(child)?;
                self.link_last(target, child_copy);
                pending.push((child, child_copy));
            }
        }
        Ok(copy)
    }

    /// Append a freshly allocated, detached node without the cycle check
    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let prev = self.get(parent).map_or(NodeId::NONE, |n| n.last_child);
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = NodeId::NONE;
        }
        if prev.is_valid() {
            if let Some(prev_node) = self.get_mut(prev) {
                prev_node.next_sibling = child;
            }
        } else if let Some(parent_node) = self.get_mut(parent) {
            parent_node.first_child = child;
        }
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.last_child = child;
        }
    }

    /// Wrap `node` in a deep copy of `template`.
    ///
    /// A copy of `node` goes inside the deepest last element of the new
    /// wrapper, the wrapper takes `node`'s place and `node` is detached.
    /// Returns the wrapper.
    pub fn wrap(&mut self, node: NodeId, template: NodeId) -> DomResult<NodeId> {
        let parent = self.parent_of(node)?;
        self.node(template)?;

        let wrapper = self.clone_deep(template)?;
        let inner = self.last_descendant(wrapper);
        let content = self.clone_deep(node)?;
        self.link_last(inner, content);

        self.insert_before(parent, wrapper, Some(node))?;
        self.detach(node);
        tracing::trace!(%node, %wrapper, "wrapped node");
        Ok(wrapper)
    }

    /// Move copies of `nodes` into `wrapper`'s deepest last element.
    ///
    /// A detached wrapper is first placed right after the last node. Each
    /// original is detached once copied.
    pub fn wrap_all(&mut self, nodes: &[NodeId], wrapper: NodeId) -> DomResult<()> {
        let &last = nodes.last().ok_or(DomError::EmptyInput)?;
        if self.node(wrapper)?.parent().is_none() {
            self.insert(Position::AfterEnd, last, wrapper)?;
        }

        let inner = self.last_descendant(wrapper);
        for &node in nodes {
            let copy = self.clone_deep(node)?;
            self.link_last(inner, copy);
            self.detach(node);
        }
        tracing::trace!(count = nodes.len(), %wrapper, "wrapped nodes");
        Ok(())
    }

    /// True when the structural links of `id` and its neighbours agree
    #[cfg(test)]
    pub(crate) fn links_consistent(&self, id: NodeId) -> bool {
        use crate::Node;

        let Some(node) = self.get(id) else {
            return false;
        };
        let prev_ok = match node.prev_sibling() {
            Some(p) => self.get(p).and_then(Node::next_sibling) == Some(id),
            None => node.parent().is_none_or(|p| self.get(p).and_then(Node::first_child) == Some(id)),
        };
        let next_ok = match node.next_sibling() {
            Some(n) => self.get(n).and_then(Node::prev_sibling) == Some(id),
            None => node.parent().is_none_or(|p| self.get(p).and_then(Node::last_child) == Some(id)),
        };
        prev_ok && next_ok
    }
}
