//! DOM operation errors
//!
//! Structural precondition violations are caller bugs, but they are reported
//! as values so the caller can recover.

use thiserror::Error;

use crate::{NodeId, NodeKind};

/// Boxed error from a markup collaborator
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("node {0} has no parent")]
    NoParent(NodeId),

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("replacement must be a {expected} node, got {actual}")]
    KindMismatch { expected: NodeKind, actual: NodeKind },

    #[error("cannot insert {node} into itself or its own descendant {target}")]
    HierarchyRequest { node: NodeId, target: NodeId },

    #[error("invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: NodeKind, actual: NodeKind },

    #[error("given node list is empty")]
    EmptyInput,

    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("fragment parse failed: {0}")]
    Fragment(#[source] BoxError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DomError::NotAChild {
            parent: NodeId(1),
            child: NodeId(4),
        };
        assert_eq!(err.to_string(), "node #4 is not a child of #1");

        let err = DomError::KindMismatch {
            expected: NodeKind::Text,
            actual: NodeKind::Element,
        };
        assert_eq!(err.to_string(), "replacement must be a text node, got element");
    }
}
