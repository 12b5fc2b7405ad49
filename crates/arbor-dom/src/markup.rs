//! Markup collaborators
//!
//! The tree never parses or renders markup itself. A [`FragmentParser`] turns
//! text into detached nodes, a [`Serializer`] turns a subtree back into text,
//! and the helpers here combine them with the mutation engine.

use crate::{BoxError, DomError, DomResult, DomTree, NodeData, NodeId, Position};

/// Parses a markup fragment into detached nodes of `tree`
pub trait FragmentParser {
    /// Parse `markup` as if it were the content of `context`. The returned
    /// nodes are top-level fragment nodes in source order, all detached.
    fn parse_fragment(
        &self,
        tree: &mut DomTree,
        markup: &str,
        context: NodeId,
    ) -> Result<Vec<NodeId>, BoxError>;
}

/// Renders a subtree back to markup
pub trait Serializer {
    /// Markup for `node` and its descendants
    fn render(&self, tree: &DomTree, node: NodeId) -> String;

    /// Markup for the children of `node`, concatenated
    fn render_children(&self, tree: &DomTree, node: NodeId) -> String {
        tree.children_of(node)
            .map(|child| self.render(tree, child))
            .collect()
    }
}

impl DomTree {
    pub fn inner_html<S: Serializer + ?Sized>(&self, node: NodeId, serializer: &S) -> String {
        serializer.render_children(self, node)
    }

    pub fn outer_html<S: Serializer + ?Sized>(&self, node: NodeId, serializer: &S) -> String {
        serializer.render(self, node)
    }

    /// Parse `markup` in the context of `node` and make the result its only
    /// children. The old children stay untouched when parsing fails.
    pub fn set_inner_html<P: FragmentParser + ?Sized>(
        &mut self,
        node: NodeId,
        markup: &str,
        parser: &P,
    ) -> DomResult<()> {
        let nodes = self.create_fragment(markup, node, parser)?;
        self.empty(node)?;
        for child in nodes {
            self.append_child(node, child)?;
        }
        Ok(())
    }

    /// Parse `markup` and insert the resulting nodes at `position` relative to
    /// `pivot`, keeping their source order.
    pub fn insert_adjacent_html<P: FragmentParser + ?Sized>(
        &mut self,
        position: Position,
        pivot: NodeId,
        markup: &str,
        parser: &P,
    ) -> DomResult<()> {
        let (parent, reference) = self.insertion_point(position, pivot)?;
        let nodes = self.create_fragment(markup, parent, parser)?;
        let count = nodes.len();
        for node in nodes {
            self.insert_before(parent, node, reference)?;
        }
        tracing::trace!(%position, %pivot, count, "inserted fragment");
        Ok(())
    }

    /// Insert a new text node holding `text` verbatim
    pub fn insert_adjacent_text(
        &mut self,
        position: Position,
        pivot: NodeId,
        text: &str,
    ) -> DomResult<NodeId> {
        self.insertion_point(position, pivot)?;
        let node = self.create_text(text);
        self.insert(position, pivot, node)?;
        Ok(node)
    }

    /// Parse `markup` into detached nodes using `context` for the parsing
    /// context
    pub fn create_fragment<P: FragmentParser + ?Sized>(
        &mut self,
        markup: &str,
        context: NodeId,
        parser: &P,
    ) -> DomResult<Vec<NodeId>> {
        self.node(context)?;
        parser
            .parse_fragment(self, markup, context)
            .map_err(DomError::Fragment)
    }

    /// Concatenated text of `node` and all its descendant text nodes
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeData::Text(text)) = self.get(node).map(|n| &n.data) {
            out.push_str(text);
        }
        for id in self.descendants(node) {
            if let Some(NodeData::Text(text)) = self.get(id).map(|n| &n.data) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace the children of `node` with one text node holding `text`
    pub fn set_text(&mut self, node: NodeId, text: &str) -> DomResult<NodeId> {
        self.empty(node)?;
        let child = self.create_text(text);
        self.append_child(node, child)?;
        Ok(child)
    }
}
