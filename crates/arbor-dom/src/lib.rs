//! Arbor DOM - Document Object Model
//!
//! Arena-based DOM tree with an ordered attribute store, element-only
//! navigation and a mutation engine. Nodes are addressed by [`NodeId`]
//! handles; parent and sibling links are handles too, so detaching a subtree
//! is a matter of rewriting a few links.

mod attributes;
mod collection;
mod error;
mod find;
mod interner;
pub mod markup;
mod mutation;
mod navigate;
mod node;
mod tree;

pub use attributes::{Attribute, AttributeList, ClassList};
pub use collection::{Collection, IntoIter, Iter};
pub use error::{BoxError, DomError, DomResult};
pub use find::{by_class, by_id, by_name, by_tag, find_all, find_first};
pub use interner::{InternedString, StringInterner};
pub use mutation::Position;
pub use navigate::Descendants;
pub use node::{ElementData, Node, NodeData, NodeKind};
pub use tree::{ChildNodes, DomTree};

use std::fmt;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node" in link fields
    pub(crate) const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub(crate) fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn get(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }

    /// Index of the node inside its arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
