//! Element collections
//!
//! Ordered result sets produced by traversal and selector queries. Order is
//! traversal or match order; duplicates are kept.

use crate::{DomError, DomResult, NodeId};

/// Ordered, finite set of element handles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    nodes: Vec<NodeId>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element at `index`, or [`DomError::IndexOutOfBounds`]
    pub fn get(&self, index: usize) -> DomResult<NodeId> {
        self.item(index).ok_or(DomError::IndexOutOfBounds {
            index,
            len: self.nodes.len(),
        })
    }

    /// Element at `index`, if any
    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_vec(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Lazy sequence in index order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.nodes.iter(),
        }
    }

    /// Call `f(element, index, collection)` for every index, in order
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(NodeId, usize, &Collection),
    {
        for (index, &id) in self.nodes.iter().enumerate() {
            f(id, index, self);
        }
    }
}

impl FromIterator<NodeId> for Collection {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<NodeId>> for Collection {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }
}

/// Borrowing iterator over a [`Collection`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, NodeId>,
}

impl Iterator for Iter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Collection {
    type Item = NodeId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Consuming, single-pass iterator over a [`Collection`]
#[derive(Debug)]
pub struct IntoIter {
    inner: std::vec::IntoIter<NodeId>,
}

impl Iterator for IntoIter {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Collection {
    type Item = NodeId;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter {
            inner: self.nodes.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Collection {
        (1..=n).map(NodeId).collect()
    }

    #[test]
    fn test_get_in_and_out_of_range() {
        let list = ids(3);
        assert_eq!(list.get(0).unwrap(), NodeId(1));
        assert!(matches!(
            list.get(3),
            Err(DomError::IndexOutOfBounds { index: 3, len: 3 })
        ));
        assert_eq!(list.item(5), None);
    }

    #[test]
    fn test_iter_in_index_order() {
        let list = ids(4);
        let seen: Vec<_> = list.iter().collect();
        assert_eq!(seen, list.as_slice());
        assert_eq!(list.iter().len(), 4);
    }

    #[test]
    fn test_into_iter_is_single_pass() {
        let mut it = ids(2).into_iter();
        assert_eq!(it.next(), Some(NodeId(1)));
        assert_eq!(it.next(), Some(NodeId(2)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_for_each_passes_index_and_collection() {
        let list = ids(3);
        let mut seen = Vec::new();
        list.for_each(|id, index, all| {
            assert_eq!(all.len(), 3);
            assert_eq!(all.item(index), Some(id));
            seen.push(index);
        });
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicates_kept() {
        let list: Collection = vec![NodeId(2), NodeId(2)].into();
        assert_eq!(list.len(), 2);
    }
}
