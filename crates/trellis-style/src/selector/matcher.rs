//! Selector matching algorithm.
//!
//! Matching starts at the rightmost link against the node itself. When a
//! link is satisfied and has a `next`, that link is tried on the parent and,
//! unless it is direct-child-only, on each further ancestor until one
//! satisfies it. The search does not backtrack: once the nearest qualifying
//! ancestor has been taken for a link, the links further left continue from
//! there.

use super::{PseudoStates, Selector};
use crate::node::StyledNode;

/// Selector matching engine.
#[derive(Debug, Clone, Copy)]
pub struct SelectorMatcher {
    depth_fast_path: bool,
}

impl Default for SelectorMatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SelectorMatcher {
    /// Create a matcher. With `depth_fast_path`, a node shallower than the
    /// link's depth is rejected without looking at it.
    pub const fn new(depth_fast_path: bool) -> Self {
        Self { depth_fast_path }
    }

    /// Whether the full selector chain matches `node`.
    pub fn matches<N: StyledNode>(&self, selector: &Selector, node: &N) -> bool {
        self.match_link(selector, node.clone(), false)
    }

    fn match_link<N: StyledNode>(&self, link: &Selector, mut node: N, expand: bool) -> bool {
        loop {
            if self.depth_fast_path && node.depth() < link.depth() {
                return false;
            }

            if Self::link_matches(link, &node) {
                return match link.next() {
                    None => true,
                    Some(next) => node
                        .parent()
                        .is_some_and(|parent| self.match_link(next, parent, true)),
                };
            }

            if !expand || link.is_direct_child() {
                return false;
            }
            match node.parent() {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Check a single link against a node, ignoring `next`.
    pub fn link_matches<N: StyledNode>(link: &Selector, node: &N) -> bool {
        if let Some(id) = link.id() {
            if node.id() != Some(id) && node.auto_id() != id {
                return false;
            }
        }

        if let Some(tag) = link.tag() {
            if !node.tags().iter().any(|t| t == tag) {
                return false;
            }
        }

        if !link
            .classes()
            .iter()
            .all(|class| node.classes().iter().any(|c| c == class))
        {
            return false;
        }

        link.pseudo().iter().all(|flag| Self::pseudo_matches(flag, node))
    }

    fn pseudo_matches<N: StyledNode>(flag: PseudoStates, node: &N) -> bool {
        match flag {
            PseudoStates::HOVER => node.is_hovered(),
            PseudoStates::FOCUS => node.is_focused(),
            PseudoStates::ACTIVE => node.is_active(),
            PseudoStates::DISABLED => !node.is_enabled(),
            PseudoStates::EMPTY => node.child_count() == 0,
            PseudoStates::FIRST_CHILD => node
                .sibling_position()
                .is_some_and(|(index, _)| index == 0),
            PseudoStates::LAST_CHILD => node
                .sibling_position()
                .is_some_and(|(index, count)| index + 1 == count),
            _ => false,
        }
    }
}

impl Selector {
    /// Whether this selector matches `node`, using the depth fast path.
    pub fn matches<N: StyledNode>(&self, node: &N) -> bool {
        SelectorMatcher::default().matches(self, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeRef;
    use trellis_core::{NodeId, NodeTree};

    fn check(tree: &NodeTree, selector: &str, node: NodeId) -> bool {
        let selector = Selector::parse(selector).unwrap();
        let node = NodeRef::new(tree, node).unwrap();
        let fast = SelectorMatcher::new(true).matches(&selector, &node);
        let slow = SelectorMatcher::new(false).matches(&selector, &node);
        assert_eq!(fast, slow, "fast path changed the result");
        fast
    }

    /// Window > Panel > Box > Label, plus a bare Label under Window.
    fn sample() -> (NodeTree, NodeId, NodeId, NodeId, NodeId) {
        let mut tree = NodeTree::new();
        let window = tree.create_node("Window");
        let panel = tree.create_child(window, "Panel").unwrap();
        let container = tree.create_child(panel, "Box").unwrap();
        let label = tree.create_child(container, "Label").unwrap();
        let loose = tree.create_child(window, "Label").unwrap();
        (tree, panel, container, label, loose)
    }

    #[test]
    fn descendant_reaches_any_ancestor() {
        let (tree, _, _, label, loose) = sample();
        assert!(check(&tree, "Panel Label", label));
        assert!(check(&tree, "Window Label", label));
        assert!(check(&tree, "Window Panel Label", label));
        assert!(!check(&tree, "Panel Label", loose));
        assert!(check(&tree, "Window Label", loose));
    }

    #[test]
    fn child_requires_immediate_parent() {
        let (tree, _, _, label, loose) = sample();
        assert!(!check(&tree, "Panel > Label", label));
        assert!(check(&tree, "Box > Label", label));
        assert!(check(&tree, "Panel > Box > Label", label));
        assert!(check(&tree, "Panel > Box Label", label));
        assert!(check(&tree, "Window > Label", loose));
        assert!(!check(&tree, "Window > Label", label));
    }

    #[test]
    fn subject_must_be_the_node() {
        let (tree, panel, container, _, _) = sample();
        assert!(!check(&tree, "Window", panel));
        assert!(check(&tree, "Panel", panel));
        assert!(!check(&tree, "Label", container));
    }

    #[test]
    fn universal_matches_everything() {
        let (tree, panel, _, label, _) = sample();
        assert!(check(&tree, "*", panel));
        assert!(check(&tree, "* Label", label));
        assert!(check(&tree, "Panel *", label));
    }

    #[test]
    fn id_matches_author_or_auto_id() {
        let (mut tree, panel, _, label, _) = sample();
        tree.set_id(panel, Some("Sidebar")).unwrap();
        assert!(check(&tree, "#sidebar", panel));
        assert!(check(&tree, "#SIDEBAR Label", label));

        let auto = format!("#{}", tree.node(label).unwrap().auto_id());
        assert!(check(&tree, &auto, label));
        assert!(!check(&tree, "#missing", label));
    }

    #[test]
    fn tag_list_and_classes() {
        let (mut tree, panel, _, _, _) = sample();
        tree.push_tag(panel, "Card").unwrap();
        tree.add_class(panel, "raised").unwrap();
        tree.add_class(panel, "dark").unwrap();
        assert!(check(&tree, "Panel", panel));
        assert!(check(&tree, "Card", panel));
        assert!(check(&tree, "Card.dark.raised", panel));
        assert!(!check(&tree, "Card.dark.flat", panel));
    }

    #[test]
    fn interaction_pseudos() {
        let (mut tree, panel, _, _, _) = sample();
        assert!(!check(&tree, "Panel:hover", panel));
        tree.set_hovered(panel, true).unwrap();
        assert!(check(&tree, "Panel:hover", panel));
        assert!(!check(&tree, "Panel:hover:focus", panel));
        tree.set_focused(panel, true).unwrap();
        tree.set_active(panel, true).unwrap();
        assert!(check(&tree, "Panel:hover:focus:active", panel));
        assert!(!check(&tree, "Panel:disabled", panel));
        tree.set_enabled(panel, false).unwrap();
        assert!(check(&tree, "Panel:disabled", panel));
    }

    #[test]
    fn structural_pseudos() {
        let (tree, panel, container, label, loose) = sample();
        assert!(check(&tree, "Label:empty", label));
        assert!(!check(&tree, "Box:empty", container));
        assert!(check(&tree, "Panel:first-child", panel));
        assert!(!check(&tree, "Panel:last-child", panel));
        assert!(check(&tree, "Label:lastchild", loose));
        assert!(check(&tree, "Label:first-child:last-child", label));

        let root = tree.parent(panel).unwrap().unwrap();
        assert!(!check(&tree, "Window:first-child", root));
    }

    #[test]
    fn no_backtracking() {
        // Window.a > Panel > Panel > Label: "Window.a > Panel Label" takes the
        // nearest Panel for the middle link, whose parent is not Window.
        let mut tree = NodeTree::new();
        let window = tree.create_node("Window");
        tree.add_class(window, "a").unwrap();
        let outer = tree.create_child(window, "Panel").unwrap();
        let inner = tree.create_child(outer, "Panel").unwrap();
        let label = tree.create_child(inner, "Label").unwrap();
        assert!(!check(&tree, "Window.a > Panel Label", label));
        assert!(check(&tree, "Window.a Panel Label", label));
    }
}
