//! The node surface read by the cascade.
//!
//! The style engine never owns or mutates nodes. It reads them through
//! [`StyledNode`], which [`NodeRef`] implements for nodes of a
//! [`trellis_core::NodeTree`]. Hosts with their own tree can implement the
//! trait directly.

use trellis_core::{NodeData, NodeId, NodeTree};

/// Read-only view of a node for selector matching.
///
/// Tag, id and class strings are expected lower-case.
pub trait StyledNode: Clone {
    /// Number of ancestors.
    fn depth(&self) -> usize;

    /// The parent node, if any.
    fn parent(&self) -> Option<Self>;

    /// Tags of the node, innermost last.
    fn tags(&self) -> &[String];

    /// Author-assigned id.
    fn id(&self) -> Option<&str>;

    /// Id generated for every node; matched by `#id` as well.
    fn auto_id(&self) -> &str;

    /// Class names.
    fn classes(&self) -> &[String];

    fn is_hovered(&self) -> bool;

    fn is_focused(&self) -> bool;

    fn is_active(&self) -> bool;

    fn is_enabled(&self) -> bool;

    /// Number of children, for `:empty`.
    fn child_count(&self) -> usize;

    /// Zero-based index among siblings and sibling count, `None` for roots.
    fn sibling_position(&self) -> Option<(usize, usize)>;
}

/// A node of a [`NodeTree`], borrowed for matching.
///
/// The depth is computed once in [`new`](Self::new) and carried to parents,
/// so walking up the ancestor chain stays linear.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a NodeTree,
    id: NodeId,
    data: &'a NodeData,
    depth: usize,
}

impl<'a> NodeRef<'a> {
    /// Borrow `id` from `tree`; `None` if the node does not exist.
    pub fn new(tree: &'a NodeTree, id: NodeId) -> Option<Self> {
        let data = tree.node(id).ok()?;
        let depth = tree.depth(id).ok()?;
        Some(Self { tree, id, data, depth })
    }

    /// The node's id in the tree.
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// The node's data.
    pub fn data(&self) -> &'a NodeData {
        self.data
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("tags", &self.data.tags())
            .finish()
    }
}

impl StyledNode for NodeRef<'_> {
    fn depth(&self) -> usize {
        self.depth
    }

    fn parent(&self) -> Option<Self> {
        let id = self.data.parent()?;
        let data = self.tree.node(id).ok()?;
        Some(Self {
            tree: self.tree,
            id,
            data,
            depth: self.depth.saturating_sub(1),
        })
    }

    fn tags(&self) -> &[String] {
        self.data.tags()
    }

    fn id(&self) -> Option<&str> {
        self.data.id()
    }

    fn auto_id(&self) -> &str {
        self.data.auto_id()
    }

    fn classes(&self) -> &[String] {
        self.data.classes()
    }

    fn is_hovered(&self) -> bool {
        self.data.state().contains(trellis_core::NodeState::HOVERED)
    }

    fn is_focused(&self) -> bool {
        self.data.state().contains(trellis_core::NodeState::FOCUSED)
    }

    fn is_active(&self) -> bool {
        self.data.state().contains(trellis_core::NodeState::ACTIVE)
    }

    fn is_enabled(&self) -> bool {
        self.data.is_enabled()
    }

    fn child_count(&self) -> usize {
        self.data.children().len()
    }

    fn sibling_position(&self) -> Option<(usize, usize)> {
        self.tree.sibling_position(self.id).ok().flatten()
    }
}
