//! Core node tree for Trellis.
//!
//! This crate hosts the retained node hierarchy the style engine reads from:
//!
//! - **Node Tree**: Arena-backed parent/child structure with stable [`NodeId`]s
//! - **Selector Surface**: Tag list, id, auto id, class set and [`NodeState`]
//! - **Style Invalidation**: Per-node `style_dirty` flags propagated to
//!   every descendant on structural and state changes
//! - **Logging**: Tracing targets, tree visualization and perf spans
//!
//! # Example
//!
//! ```
//! use trellis_core::NodeTree;
//!
//! let mut tree = NodeTree::new();
//! let window = tree.create_node("Window");
//! let button = tree.create_child(window, "Button")?;
//! tree.add_class(button, "primary")?;
//!
//! assert_eq!(tree.depth(button)?, 1);
//! assert!(tree.is_style_dirty(button)?);
//! # Ok::<(), trellis_core::TreeError>(())
//! ```

mod error;
pub mod logging;
pub mod node;

pub use error::{TreeError, TreeResult};
pub use logging::{NodeTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use node::{NodeData, NodeId, NodeState, NodeTree};
