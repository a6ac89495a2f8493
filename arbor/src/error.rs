//! Error types for tree construction and identifier generation.

use thiserror::Error;

use crate::tree::NodeId;

/// Structural errors raised while wiring a tree by hand.
///
/// The builder never produces these: it only attaches subtrees it has just
/// finalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The handle does not belong to this collection.
    #[error("node {0} does not exist in this tree")]
    UnknownNode(NodeId),

    /// The child is already owned by another node.
    #[error("node {child} is already a child of node {parent}")]
    AlreadyAttached {
        /// The node that was about to be attached.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// The child is already part of the root sequence.
    #[error("node {0} is a root and cannot be attached to another node")]
    AlreadyRoot(NodeId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching node {child} to node {parent} would create a cycle")]
    Cycle {
        /// The would-be parent.
        parent: NodeId,
        /// The would-be child.
        child: NodeId,
    },
}

/// Errors raised by the identifier service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Every counter value in the scope maps to an id that is already taken.
    #[error("no unused identifier left after cycling {capacity} candidates")]
    ExhaustedNamespace {
        /// Size of the counter space that was searched.
        capacity: u64,
    },
}
