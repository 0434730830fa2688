//! The scene: a node tree with per-node styles and the frame pass.

use slotmap::SecondaryMap;
use trellis_core::logging::{PerfSpan, targets};
use trellis_core::{NodeId, NodeTree, NodeTreeDebug, TreeError};
use trellis_style::node::NodeRef;
use trellis_style::resolve::{SharedStyleManager, StyleContext, StyleManager};
use trellis_style::style::Style;
use trellis_style::widget::{BoxFlags, BoxSkin, Rect, Skin, StylePaintContext};

use crate::error::{SceneError, SceneResult};
use crate::kind::NodeKind;

/// Style slots of one node.
#[derive(Debug)]
struct NodeStyles {
    kind: NodeKind,
    inline: Style,
    defaults: Style,
    computed: Style,
    flags: BoxFlags,
}

impl Default for NodeStyles {
    fn default() -> Self {
        Self::new(NodeKind::Container)
    }
}

impl NodeStyles {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            inline: Style::new(),
            defaults: (kind.capabilities().default_style)(),
            computed: Style::new(),
            flags: BoxFlags::empty(),
        }
    }
}

/// A node tree whose nodes carry styles.
///
/// Every node has a [`NodeKind`], an inline style, a default style and the
/// last computed style. Style managers are attached to nodes explicitly,
/// usually one per root; a node uses the manager attached to it or to its
/// nearest ancestor.
///
/// Structural, class and state changes go through [`tree_mut`](Self::tree_mut),
/// which marks the affected subtrees style-dirty. Once per frame,
/// [`update_styles`](Self::update_styles) recomputes what is stale.
/// Nodes created directly on the tree are adopted as
/// [`NodeKind::Container`] nodes; until then they read as an empty one.
///
/// # Example
///
/// ```
/// use trellis::prelude::*;
///
/// let mut scene = Scene::new();
/// let window = scene.create_node(NodeKind::Container);
/// let label = scene.create_child(window, NodeKind::Text)?;
///
/// let manager = SharedStyleManager::default();
/// manager.write().style("Container").set(FloatKey::FontSize, 18.0);
/// manager.write().style("Text").set(ColorKey::Color, Color::BLACK);
/// scene.set_style_manager(window, manager)?;
///
/// scene.update_styles()?;
/// let style = scene.computed_style(label)?;
/// assert_eq!(style.get(ColorKey::Color), Color::BLACK);
/// assert_eq!(style.get(FloatKey::FontSize), 18.0);
/// # Ok::<(), trellis::SceneError>(())
/// ```
#[derive(Debug, Default)]
pub struct Scene {
    tree: NodeTree,
    styles: SecondaryMap<NodeId, NodeStyles>,
    managers: SecondaryMap<NodeId, SharedStyleManager>,
    unadopted: NodeStyles,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Mutable tree access for structure, tags, ids, classes and state.
    pub fn tree_mut(&mut self) -> &mut NodeTree {
        &mut self.tree
    }

    /// Create a root node of `kind`, tagged with the kind name.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.tree.create_node(kind.name());
        self.styles.insert(id, NodeStyles::new(kind));
        id
    }

    /// Create a node of `kind` as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, kind: NodeKind) -> SceneResult<NodeId> {
        let id = self.tree.create_child(parent, kind.name())?;
        self.styles.insert(id, NodeStyles::new(kind));
        Ok(id)
    }

    /// Destroy a node and its subtree.
    pub fn destroy(&mut self, id: NodeId) -> SceneResult<()> {
        self.tree.destroy(id)?;
        let tree = &self.tree;
        self.styles.retain(|node, _| tree.contains(node));
        self.managers.retain(|node, _| tree.contains(node));
        Ok(())
    }

    fn styles(&self, id: NodeId) -> SceneResult<&NodeStyles> {
        if !self.tree.contains(id) {
            return Err(TreeError::InvalidNode(id).into());
        }
        Ok(self.styles.get(id).unwrap_or(&self.unadopted))
    }

    fn styles_mut(&mut self, id: NodeId) -> SceneResult<&mut NodeStyles> {
        if !self.tree.contains(id) {
            return Err(TreeError::InvalidNode(id).into());
        }
        if !self.styles.contains_key(id) {
            self.styles.insert(id, NodeStyles::default());
        }
        self.styles
            .get_mut(id)
            .ok_or(SceneError::Tree(TreeError::InvalidNode(id)))
    }

    /// Adopt nodes created directly on the tree and drop the slots of nodes
    /// destroyed there.
    fn sync_with_tree(&mut self) {
        let tree = &self.tree;
        self.styles.retain(|node, _| tree.contains(node));
        self.managers.retain(|node, _| tree.contains(node));
        for id in tree.ids() {
            if !self.styles.contains_key(id) {
                tracing::debug!(target: targets::SCENE, node = ?id, "adopted node");
                self.styles.insert(id, NodeStyles::default());
            }
        }
    }

    pub fn kind(&self, id: NodeId) -> SceneResult<NodeKind> {
        Ok(self.styles(id)?.kind)
    }

    /// Attach a style manager to `id` and its subtree.
    pub fn set_style_manager(&mut self, id: NodeId, manager: SharedStyleManager) -> SceneResult<()> {
        self.tree.mark_style_dirty(id)?;
        self.managers.insert(id, manager);
        tracing::debug!(target: targets::SCENE, node = ?id, "attached style manager");
        Ok(())
    }

    /// Detach the manager attached directly to `id`.
    pub fn remove_style_manager(&mut self, id: NodeId) -> SceneResult<Option<SharedStyleManager>> {
        self.tree.mark_style_dirty(id)?;
        Ok(self.managers.remove(id))
    }

    /// The manager attached to `id` or its nearest ancestor.
    pub fn style_manager(&self, id: NodeId) -> Option<SharedStyleManager> {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(manager) = self.managers.get(node) {
                return Some(manager.clone());
            }
            current = self.tree.parent(node).ok().flatten();
        }
        None
    }

    pub fn inline_style(&self, id: NodeId) -> SceneResult<&Style> {
        Ok(&self.styles(id)?.inline)
    }

    /// Edit the inline style. The node's subtree is marked dirty.
    pub fn inline_style_mut(&mut self, id: NodeId) -> SceneResult<&mut Style> {
        self.tree.mark_style_dirty(id)?;
        Ok(&mut self.styles_mut(id)?.inline)
    }

    pub fn default_style(&self, id: NodeId) -> SceneResult<&Style> {
        Ok(&self.styles(id)?.defaults)
    }

    /// Edit the default style. The node's subtree is marked dirty.
    pub fn default_style_mut(&mut self, id: NodeId) -> SceneResult<&mut Style> {
        self.tree.mark_style_dirty(id)?;
        Ok(&mut self.styles_mut(id)?.defaults)
    }

    /// The last computed style, which may be stale.
    pub fn computed_style(&self, id: NodeId) -> SceneResult<&Style> {
        Ok(&self.styles(id)?.computed)
    }

    /// Paint flags derived from the last computed style.
    pub fn box_flags(&self, id: NodeId) -> SceneResult<BoxFlags> {
        Ok(self.styles(id)?.flags)
    }

    fn recompute(&mut self, id: NodeId, manager: &StyleManager) -> SceneResult<()> {
        let entry = self.styles(id)?;
        let caps = entry.kind.capabilities();
        let node = NodeRef::new(&self.tree, id).ok_or(TreeError::InvalidNode(id))?;

        let mut context = StyleContext::new(&caps.inheritable)
            .with_inline(&entry.inline)
            .with_defaults(&entry.defaults);
        if let Some(parent) = self.tree.parent(id)?.and_then(|p| self.styles.get(p)) {
            context = context.with_parent(&parent.computed);
        }

        let computed = manager.compute_style(&node, &context);
        let flags = (caps.style_updated)(&computed);
        tracing::trace!(target: targets::SCENE, node = ?id, ?flags, "recomputed style");

        let entry = self.styles_mut(id)?;
        entry.computed = computed;
        entry.flags = flags;
        self.tree.clear_style_dirty(id)?;
        Ok(())
    }

    /// Bring `id`'s computed style up to date and return it.
    ///
    /// Ancestors are brought up to date first. A node is stale when it is
    /// style-dirty or its manager is invalid.
    pub fn ensure_style(&mut self, id: NodeId) -> SceneResult<&Style> {
        self.sync_with_tree();
        let mut stale = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            let manager = self.style_manager(node);
            let manager_valid = manager.as_ref().is_some_and(|m| m.read().is_valid());
            if self.tree.is_style_dirty(node)? || !manager_valid {
                stale.push((node, manager));
            }
            current = self.tree.parent(node)?;
        }

        for (node, manager) in stale.into_iter().rev() {
            let manager = manager.ok_or(SceneError::NoStyleManager(node))?;
            self.recompute(node, &manager.read())?;
        }
        self.computed_style(id)
    }

    /// Recompute stale styles of every visible node.
    ///
    /// Runs once per frame. Under an invalid manager every visible node is
    /// recomputed; under a valid one only style-dirty nodes are. Parents are
    /// always computed before their children. Each manager that takes part
    /// is marked valid before its first node is computed, so declarations
    /// changed during the pass are picked up by the next one.
    ///
    /// Dirty nodes without a reachable manager are skipped and stay dirty
    /// until one is attached. Returns the number of recomputed nodes.
    #[tracing::instrument(skip(self), target = "trellis::scene", level = "debug")]
    pub fn update_styles(&mut self) -> SceneResult<usize> {
        let _perf = PerfSpan::new("update_styles");
        self.sync_with_tree();

        let mut claimed = Vec::new();
        let result = self.recompute_stale(&mut claimed);
        if result.is_err() {
            // An unfinished full recompute must run again next frame.
            for (manager, was_valid) in &claimed {
                if !was_valid {
                    manager.read().invalidate();
                }
            }
        }
        result
    }

    fn recompute_stale(
        &mut self,
        claimed: &mut Vec<(SharedStyleManager, bool)>,
    ) -> SceneResult<usize> {
        let mut recomputed = 0;
        let mut unmanaged = 0;

        for root in self.tree.roots() {
            let mut stack: Vec<(NodeId, Option<SharedStyleManager>)> = vec![(root, None)];

            while let Some((id, inherited)) = stack.pop() {
                let data = self.tree.node(id)?;
                if !data.is_visible() {
                    continue;
                }
                let dirty = data.is_style_dirty();
                let children: Vec<NodeId> = data.children().iter().rev().copied().collect();

                let manager = self.managers.get(id).cloned().or(inherited);
                match &manager {
                    Some(manager) => {
                        let full = match claimed.iter().find(|(m, _)| m.ptr_eq(manager)) {
                            Some((_, was_valid)) => !was_valid,
                            None => {
                                let was_valid = manager.read().swap_valid();
                                claimed.push((manager.clone(), was_valid));
                                !was_valid
                            }
                        };
                        if full || dirty {
                            self.recompute(id, &manager.read())?;
                            recomputed += 1;
                        }
                    }
                    None if dirty => unmanaged += 1,
                    None => {}
                }

                stack.extend(children.into_iter().map(|child| (child, manager.clone())));
            }
        }

        if unmanaged > 0 {
            tracing::debug!(
                target: targets::SCENE,
                unmanaged,
                "skipped dirty nodes without a style manager"
            );
        }
        tracing::debug!(target: targets::SCENE, recomputed, "style pass complete");
        Ok(recomputed)
    }

    /// Paint a node's box with the skin named by its `skin` property, or
    /// [`BoxSkin`] when none is registered under that name.
    pub fn paint(
        &mut self,
        id: NodeId,
        ctx: &mut dyn StylePaintContext,
        rect: Rect,
    ) -> SceneResult<()> {
        self.ensure_style(id)?;
        let manager = self
            .style_manager(id)
            .ok_or(SceneError::NoStyleManager(id))?;
        let style = self.computed_style(id)?;
        let skin: Box<dyn Skin> = manager
            .read()
            .skin_for(style)
            .unwrap_or_else(|| Box::new(BoxSkin));
        skin.render(ctx, rect, style);
        Ok(())
    }

    /// Render the node tree for debugging.
    pub fn debug_tree(&self) -> SceneResult<String> {
        Ok(NodeTreeDebug::new().format_all(&self.tree)?)
    }
}
