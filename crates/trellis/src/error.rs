//! Error types for the scene.

use trellis_core::{NodeId, TreeError};

/// Errors that can occur during scene operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// A node tree operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A node needs a style but no style manager is attached to it or any
    /// of its ancestors.
    #[error("No style manager reachable from node {0:?}")]
    NoStyleManager(NodeId),
}

/// Result type for scene operations.
pub type SceneResult<T> = std::result::Result<T, SceneError>;
