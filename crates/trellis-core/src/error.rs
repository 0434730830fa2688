//! Error types for the node tree.

use crate::node::NodeId;

/// Errors that can occur during node tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The node ID is invalid or the node has been destroyed.
    #[error("Invalid or destroyed node ID {0:?}")]
    InvalidNode(NodeId),

    /// Attempted to set a node as its own parent or ancestor.
    #[error("Cannot set node {child:?} under its own descendant {parent:?}")]
    CircularParentage {
        /// The node being re-parented.
        child: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
}

/// Result type for node tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;
