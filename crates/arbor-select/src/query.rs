//! Selector queries
//!
//! Entry points that compile through a [`SelectorCache`] and walk a subtree.
//! The query root itself is never part of a result.

use arbor_dom::{Collection, DomTree, NodeId};

use crate::{SelectorCache, SelectorResult};

/// Every descendant of `root` matching `selector`, in document order
pub fn query_all(
    tree: &DomTree,
    root: NodeId,
    selector: &str,
    cache: &SelectorCache,
) -> SelectorResult<Collection> {
    let matcher = cache.compile(selector)?;
    let mut nodes = matcher.match_all(tree, root).into_vec();
    if nodes.first() == Some(&root) {
        nodes.remove(0);
    }
    tracing::trace!(selector, %root, found = nodes.len(), "query_all");
    Ok(Collection::from_vec(nodes))
}

/// First descendant of `root` matching `selector`, in document order
pub fn query_first(
    tree: &DomTree,
    root: NodeId,
    selector: &str,
    cache: &SelectorCache,
) -> SelectorResult<Option<NodeId>> {
    let matcher = cache.compile(selector)?;
    Ok(tree
        .descendants(root)
        .find(|&node| matcher.matches(tree, node)))
}

/// Whether `node` itself matches `selector`
pub fn matches(
    tree: &DomTree,
    node: NodeId,
    selector: &str,
    cache: &SelectorCache,
) -> SelectorResult<bool> {
    Ok(cache.compile(selector)?.matches(tree, node))
}
