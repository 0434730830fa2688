//! Node tree for Trellis.
//!
//! Provides the retained node hierarchy that the style engine reads from:
//! - Stable node identifiers via arena-based storage
//! - Parent-child relationships with subtree destruction
//! - Selector-facing data: tag list, id, auto id, class set, interaction state
//! - Per-node `style_dirty` flags with unconditional subtree propagation
//!
//! All tag, id and class strings are lower-cased when stored. Selector text is
//! lower-cased by the style engine as well, so the two sides always compare in
//! the same case.
//!
//! # Key Types
//!
//! - [`NodeTree`] - Owns every node and its relationships
//! - [`NodeId`] - Stable handle into the tree
//! - [`NodeData`] - Read access to a single node
//! - [`NodeState`] - Interaction and visibility flags

use bitflags::bitflags;
use slotmap::{SlotMap, new_key_type};

use crate::error::{TreeError, TreeResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a node in a [`NodeTree`].
    ///
    /// `NodeId`s remain valid while the tree changes shape and become invalid
    /// once the node (or one of its ancestors) is destroyed.
    pub struct NodeId;
}

impl NodeId {
    /// Convert the NodeId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

bitflags! {
    /// Interaction and visibility state of a node.
    ///
    /// The empty set is the resting state: enabled, visible, not hovered,
    /// not focused, not pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeState: u8 {
        /// The pointer is over the node.
        const HOVERED  = 0b0000_0001;
        /// The node has keyboard focus.
        const FOCUSED  = 0b0000_0010;
        /// The node is being pressed.
        const ACTIVE   = 0b0000_0100;
        /// The node does not accept interaction.
        const DISABLED = 0b0000_1000;
        /// The node is hidden and skipped by style passes.
        const HIDDEN   = 0b0001_0000;
    }
}

/// Data stored for each node.
#[derive(Debug, Clone)]
pub struct NodeData {
    tags: Vec<String>,
    id: Option<String>,
    auto_id: String,
    classes: Vec<String>,
    state: NodeState,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style_dirty: bool,
}

impl NodeData {
    fn new(tag: &str, serial: u64) -> Self {
        Self {
            tags: vec![tag.to_lowercase()],
            id: None,
            auto_id: format!("node-{serial}"),
            classes: Vec::new(),
            state: NodeState::empty(),
            parent: None,
            children: Vec::new(),
            style_dirty: true,
        }
    }

    /// Tag list, most generic first and innermost last.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The innermost (most specific) tag.
    pub fn tag(&self) -> &str {
        self.tags.last().map(String::as_str).unwrap_or_default()
    }

    /// Author-assigned id, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Id generated by the tree when the node was created.
    pub fn auto_id(&self) -> &str {
        &self.auto_id
    }

    /// Class names in insertion order, without duplicates.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the node carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        let class = class.to_lowercase();
        self.classes.iter().any(|c| *c == class)
    }

    /// Current interaction state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Parent node, `None` for roots.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in sibling order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node needs its style recomputed.
    pub fn is_style_dirty(&self) -> bool {
        self.style_dirty
    }

    /// Whether the node itself is visible (ignores ancestors).
    pub fn is_visible(&self) -> bool {
        !self.state.contains(NodeState::HIDDEN)
    }

    /// Whether the node itself is enabled (ignores ancestors).
    pub fn is_enabled(&self) -> bool {
        !self.state.contains(NodeState::DISABLED)
    }
}

/// Arena of nodes and their relationships.
///
/// Every mutation that can change how a selector matches a node marks that
/// node and all of its descendants style-dirty. Structural edits dirty the
/// parent's whole subtree since sibling positions and child counts feed
/// `:first-child`, `:last-child` and `:empty`.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: SlotMap<NodeId, NodeData>,
    next_serial: u64,
}

impl NodeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node with a single tag.
    pub fn create_node(&mut self, tag: &str) -> NodeId {
        let serial = self.next_serial;
        self.next_serial += 1;
        let id = self.nodes.insert(NodeData::new(tag, serial));
        tracing::trace!(target: targets::TREE, ?id, tag, "created node");
        id
    }

    /// Create a node and append it to `parent`.
    pub fn create_child(&mut self, parent: NodeId, tag: &str) -> TreeResult<NodeId> {
        self.node(parent)?;
        let id = self.create_node(tag);
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Read access to a node.
    pub fn node(&self, id: NodeId) -> TreeResult<&NodeData> {
        self.nodes.get(id).ok_or(TreeError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(TreeError::InvalidNode(id))
    }

    /// Check if a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Ids of all live nodes, in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys()
    }

    /// Nodes without a parent.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Destroy a node and its whole subtree.
    #[tracing::instrument(skip(self), target = "trellis_core::tree", level = "trace")]
    pub fn destroy(&mut self, id: NodeId) -> TreeResult<()> {
        let doomed = self.descendants(id)?;
        let parent = self.node(id)?.parent;

        if let Some(parent_id) = parent {
            if let Some(parent_data) = self.nodes.get_mut(parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
            self.mark_style_dirty(parent_id)?;
        }

        for node in doomed {
            self.nodes.remove(node);
        }
        self.nodes.remove(id);
        Ok(())
    }

    /// Move a node under a new parent, or detach it with `None`.
    ///
    /// The node is appended after the parent's existing children.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> TreeResult<()> {
        self.node(id)?;
        if let Some(parent_id) = new_parent {
            self.node(parent_id)?;
            if self.is_ancestor_of(id, parent_id) {
                return Err(TreeError::CircularParentage {
                    child: id,
                    parent: parent_id,
                });
            }
        }

        let old_parent = self.node(id)?.parent;
        if let Some(old_parent_id) = old_parent {
            if let Some(parent_data) = self.nodes.get_mut(old_parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
            self.mark_style_dirty(old_parent_id)?;
        }

        self.node_mut(id)?.parent = new_parent;

        match new_parent {
            Some(parent_id) => {
                self.node_mut(parent_id)?.children.push(id);
                self.mark_style_dirty(parent_id)?;
            }
            None => self.mark_style_dirty(id)?,
        }

        tracing::trace!(target: targets::TREE, ?id, ?old_parent, ?new_parent, "reparented node");
        Ok(())
    }

    /// Append `child` to `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.set_parent(child, Some(parent))
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        self.node(id).map(|d| d.parent)
    }

    /// Get the children of a node.
    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        self.node(id).map(|d| d.children.as_slice())
    }

    /// Number of ancestors above the node; roots have depth 0.
    pub fn depth(&self, id: NodeId) -> TreeResult<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?.parent;
        while let Some(parent_id) = current {
            depth += 1;
            current = self.node(parent_id)?.parent;
        }
        Ok(depth)
    }

    /// Index among the parent's children and the sibling count, including
    /// the node itself. `None` for roots.
    pub fn sibling_position(&self, id: NodeId) -> TreeResult<Option<(usize, usize)>> {
        let Some(parent_id) = self.node(id)?.parent else {
            return Ok(None);
        };
        let siblings = self.children(parent_id)?;
        Ok(siblings
            .iter()
            .position(|&sibling| sibling == id)
            .map(|index| (index, siblings.len())))
    }

    /// All descendants in pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id)?.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current)?.iter().rev().copied());
        }
        Ok(result)
    }

    /// `id` followed by its descendants in pre-order (parents before children).
    pub fn preorder(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let mut result = vec![id];
        result.extend(self.descendants(id)?);
        Ok(result)
    }

    /// Append a more specific tag (e.g. a subclass name) to the tag list.
    pub fn push_tag(&mut self, id: NodeId, tag: &str) -> TreeResult<()> {
        let tag = tag.to_lowercase();
        let data = self.node_mut(id)?;
        if data.tags.contains(&tag) {
            return Ok(());
        }
        data.tags.push(tag);
        self.mark_style_dirty(id)
    }

    /// Set or clear the author id.
    pub fn set_id(&mut self, id: NodeId, value: Option<&str>) -> TreeResult<()> {
        let value = value.map(str::to_lowercase);
        let data = self.node_mut(id)?;
        if data.id == value {
            return Ok(());
        }
        data.id = value;
        self.mark_style_dirty(id)
    }

    /// Add a class. Returns `true` if it was not present before.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> TreeResult<bool> {
        let class = class.to_lowercase();
        let data = self.node_mut(id)?;
        if data.classes.contains(&class) {
            return Ok(false);
        }
        data.classes.push(class);
        self.mark_style_dirty(id)?;
        Ok(true)
    }

    /// Remove a class. Returns `true` if it was present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> TreeResult<bool> {
        let class = class.to_lowercase();
        let data = self.node_mut(id)?;
        let Some(pos) = data.classes.iter().position(|c| *c == class) else {
            return Ok(false);
        };
        data.classes.remove(pos);
        self.mark_style_dirty(id)?;
        Ok(true)
    }

    /// Toggle a class. Returns `true` if it was added.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> TreeResult<bool> {
        if self.node(id)?.has_class(class) {
            self.remove_class(id, class)?;
            Ok(false)
        } else {
            self.add_class(id, class)
        }
    }

    /// Turn state flags on or off. Returns `true` if the state changed.
    pub fn set_state(&mut self, id: NodeId, flags: NodeState, on: bool) -> TreeResult<bool> {
        let data = self.node_mut(id)?;
        let before = data.state;
        data.state.set(flags, on);
        if data.state == before {
            return Ok(false);
        }
        tracing::trace!(target: targets::TREE, ?id, ?before, after = ?data.state, "node state changed");
        self.mark_style_dirty(id)?;
        Ok(true)
    }

    /// Set the hover state.
    pub fn set_hovered(&mut self, id: NodeId, hovered: bool) -> TreeResult<bool> {
        self.set_state(id, NodeState::HOVERED, hovered)
    }

    /// Set the focus state.
    pub fn set_focused(&mut self, id: NodeId, focused: bool) -> TreeResult<bool> {
        self.set_state(id, NodeState::FOCUSED, focused)
    }

    /// Set the pressed state.
    pub fn set_active(&mut self, id: NodeId, active: bool) -> TreeResult<bool> {
        self.set_state(id, NodeState::ACTIVE, active)
    }

    /// Enable or disable the node.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> TreeResult<bool> {
        self.set_state(id, NodeState::DISABLED, !enabled)
    }

    /// Show or hide the node.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> TreeResult<bool> {
        self.set_state(id, NodeState::HIDDEN, !visible)
    }

    /// Whether the node and all of its ancestors are visible.
    pub fn is_effectively_visible(&self, id: NodeId) -> TreeResult<bool> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let data = self.node(node_id)?;
            if !data.is_visible() {
                return Ok(false);
            }
            current = data.parent;
        }
        Ok(true)
    }

    /// Whether the node needs its style recomputed.
    pub fn is_style_dirty(&self, id: NodeId) -> TreeResult<bool> {
        self.node(id).map(|d| d.style_dirty)
    }

    /// Mark a node and every descendant style-dirty.
    ///
    /// Walks the full subtree even when `id` is already dirty: a clean
    /// descendant under a dirty node is a valid state (e.g. after a lazy
    /// recompute of just that descendant).
    pub fn mark_style_dirty(&mut self, id: NodeId) -> TreeResult<()> {
        let mut stack = vec![id];
        let mut count = 0usize;
        while let Some(current) = stack.pop() {
            let data = self.node_mut(current)?;
            data.style_dirty = true;
            stack.extend(data.children.iter().copied());
            count += 1;
        }
        tracing::trace!(target: targets::TREE, ?id, count, "marked subtree style-dirty");
        Ok(())
    }

    /// Clear the dirty flag of a single node after its style was recomputed.
    pub fn clear_style_dirty(&mut self, id: NodeId) -> TreeResult<()> {
        self.node_mut(id)?.style_dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build() -> (NodeTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = NodeTree::new();
        let root = tree.create_node("Window");
        let panel = tree.create_child(root, "Panel").unwrap();
        let first = tree.create_child(panel, "Label").unwrap();
        let second = tree.create_child(panel, "Button").unwrap();
        (tree, root, panel, first, second)
    }

    fn clean_all(tree: &mut NodeTree, root: NodeId) {
        for id in tree.preorder(root).unwrap() {
            tree.clear_style_dirty(id).unwrap();
        }
    }

    #[test]
    fn new_nodes_start_dirty_and_lowercased() {
        let mut tree = NodeTree::new();
        let id = tree.create_node("Button");
        let data = tree.node(id).unwrap();
        assert!(data.is_style_dirty());
        assert_eq!(data.tags(), ["button".to_string()]);
        assert!(data.auto_id().starts_with("node-"));
    }

    #[test]
    fn depth_and_siblings() {
        let (tree, root, panel, first, second) = build();
        assert_eq!(tree.depth(root).unwrap(), 0);
        assert_eq!(tree.depth(panel).unwrap(), 1);
        assert_eq!(tree.depth(second).unwrap(), 2);
        assert_eq!(tree.sibling_position(first).unwrap(), Some((0, 2)));
        assert_eq!(tree.sibling_position(second).unwrap(), Some((1, 2)));
        assert_eq!(tree.sibling_position(root).unwrap(), None);
    }

    #[test]
    fn preorder_visits_parents_first() {
        let (tree, root, panel, first, second) = build();
        assert_eq!(tree.preorder(root).unwrap(), vec![root, panel, first, second]);
    }

    #[test]
    fn circular_parentage_rejected() {
        let (mut tree, root, panel, first, _) = build();
        let err = tree.set_parent(root, Some(first)).unwrap_err();
        assert_eq!(err, TreeError::CircularParentage { child: root, parent: first });
        assert!(tree.set_parent(panel, Some(panel)).is_err());
    }

    #[test]
    fn state_change_dirties_whole_subtree() {
        let (mut tree, root, panel, first, second) = build();
        clean_all(&mut tree, root);

        assert!(tree.set_hovered(panel, true).unwrap());
        assert!(!tree.is_style_dirty(root).unwrap());
        assert!(tree.is_style_dirty(panel).unwrap());
        assert!(tree.is_style_dirty(first).unwrap());
        assert!(tree.is_style_dirty(second).unwrap());

        // No change, no extra invalidation.
        clean_all(&mut tree, root);
        assert!(!tree.set_hovered(panel, true).unwrap());
        assert!(!tree.is_style_dirty(panel).unwrap());
    }

    #[test]
    fn propagation_reaches_clean_nodes_under_dirty_parent() {
        let (mut tree, root, panel, first, _) = build();
        clean_all(&mut tree, root);
        tree.mark_style_dirty(panel).unwrap();
        tree.clear_style_dirty(first).unwrap();

        tree.mark_style_dirty(panel).unwrap();
        assert!(tree.is_style_dirty(first).unwrap());
    }

    #[test]
    fn structural_change_dirties_siblings() {
        let (mut tree, root, panel, first, second) = build();
        clean_all(&mut tree, root);

        tree.create_child(panel, "Label").unwrap();
        assert!(tree.is_style_dirty(first).unwrap());
        assert!(tree.is_style_dirty(second).unwrap());
        assert!(!tree.is_style_dirty(root).unwrap());
    }

    #[test]
    fn classes_and_ids() {
        let (mut tree, _, panel, _, _) = build();
        assert!(tree.add_class(panel, "Primary").unwrap());
        assert!(!tree.add_class(panel, "primary").unwrap());
        assert!(tree.node(panel).unwrap().has_class("PRIMARY"));
        assert!(!tree.toggle_class(panel, "primary").unwrap());
        assert!(tree.node(panel).unwrap().classes().is_empty());

        tree.set_id(panel, Some("Sidebar")).unwrap();
        assert_eq!(tree.node(panel).unwrap().id(), Some("sidebar"));
    }

    #[test]
    fn destroy_removes_subtree() {
        let (mut tree, root, panel, first, _) = build();
        tree.destroy(panel).unwrap();
        assert!(!tree.contains(first));
        assert!(tree.children(root).unwrap().is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn effective_visibility() {
        let (mut tree, _, panel, first, _) = build();
        assert!(tree.is_effectively_visible(first).unwrap());
        tree.set_visible(panel, false).unwrap();
        assert!(!tree.is_effectively_visible(first).unwrap());
        assert!(tree.node(first).unwrap().is_visible());
    }
}
