//! Predicate search
//!
//! Searches over the descendants of a root (the root itself is never
//! tested), plus the lookups built on them.

use crate::{Collection, DomTree, Node, NodeId};

/// Every descendant of `root` accepted by `predicate`, in preorder. The walk
/// descends into every node whether it matched or not.
pub fn find_all<F>(tree: &DomTree, root: NodeId, mut predicate: F) -> Collection
where
    F: FnMut(NodeId, &Node) -> bool,
{
    tree.descendants(root)
        .filter(|&id| tree.get(id).is_some_and(|node| predicate(id, node)))
        .collect()
}

/// First descendant of `root` accepted by `predicate`. Each level is scanned
/// left to right before descending, one child subtree at a time.
pub fn find_first<F>(tree: &DomTree, root: NodeId, mut predicate: F) -> Option<NodeId>
where
    F: FnMut(NodeId, &Node) -> bool,
{
    // Parents still to scan; children are pushed in reverse so the first
    // child's subtree is finished before its next sibling is scanned.
    let mut parents = vec![root];
    let mut below = Vec::new();
    while let Some(parent) = parents.pop() {
        let hit = tree
            .children_of(parent)
            .find(|&id| tree.get(id).is_some_and(|node| predicate(id, node)));
        if hit.is_some() {
            return hit;
        }
        below.extend(tree.children_of(parent));
        parents.extend(below.drain(..).rev());
    }
    None
}

/// First element in document order whose `id` attribute equals `id`
pub fn by_id(tree: &DomTree, root: NodeId, id: &str) -> Option<NodeId> {
    tree.descendants(root)
        .find(|&node| tree.attributes(node).is_some_and(|a| a.has_value("id", id)))
}

/// Elements with tag name `tag`. HTML elements compare ASCII
/// case-insensitively, foreign (`svg`, `math`) elements exactly.
pub fn by_tag(tree: &DomTree, root: NodeId, tag: &str) -> Collection {
    let lower = tree.interner().lookup(&tag.to_ascii_lowercase());
    let exact = tree.interner().lookup(tag);
    if lower.is_none() && exact.is_none() {
        return Collection::new();
    }
    find_all(tree, root, |_, node| match node.as_element() {
        Some(e) if e.namespace.is_some() => Some(e.tag) == exact,
        Some(e) => Some(e.tag) == lower,
        None => false,
    })
}

/// Elements whose `class` attribute contains the token `class_name`
pub fn by_class(tree: &DomTree, root: NodeId, class_name: &str) -> Collection {
    find_all(tree, root, |_, node| {
        node.attributes().is_some_and(|a| a.has_class(class_name))
    })
}

/// Elements whose `name` attribute equals `name`
pub fn by_name(tree: &DomTree, root: NodeId, name: &str) -> Collection {
    find_all(tree, root, |_, node| {
        node.attributes().is_some_and(|a| a.has_value("name", name))
    })
}
