//! Logging and debugging facilities for Trellis.
//!
//! This module provides:
//! - Fixed `tracing` targets for each subsystem
//! - Debug visualization for node trees, including style-dirty flags
//! - Performance tracing hooks for profiling style passes
//!
//! # Tracing Integration
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis_style::cascade=trace")
//!     .init();
//! ```

use std::fmt::Write as FmtWrite;

use crate::error::TreeResult;
use crate::node::{NodeId, NodeTree};

/// Target names for log filtering.
pub mod targets {
    /// Node tree target.
    pub const TREE: &str = "trellis_core::tree";
    /// Selector parsing and matching target.
    pub const SELECTOR: &str = "trellis_style::selector";
    /// Cascade and style manager target.
    pub const CASCADE: &str = "trellis_style::cascade";
    /// Scene frame pass target.
    pub const SCENE: &str = "trellis::scene";
    /// Performance spans target.
    pub const PERF: &str = "trellis::perf";
}

/// Style options for node tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for node tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show the author id or auto id.
    pub show_ids: bool,
    /// Whether to show classes.
    pub show_classes: bool,
    /// Whether to mark style-dirty and hidden nodes.
    pub show_flags: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_classes: true,
            show_flags: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output (tags only).
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_classes: false,
            show_flags: false,
            ..Default::default()
        }
    }

    /// Use the given tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }
}

/// Debug utility for visualizing node trees.
#[derive(Debug, Clone, Default)]
pub struct NodeTreeDebug {
    options: TreeFormatOptions,
}

impl NodeTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every root of the tree.
    pub fn format_all(&self, tree: &NodeTree) -> TreeResult<String> {
        let roots = tree.roots();
        let mut output = String::new();
        let _ = writeln!(output, "Node Tree ({} total nodes):", tree.node_count());
        if roots.is_empty() {
            output.push_str("  (empty)\n");
        }
        for root in roots {
            self.format_subtree_into(tree, root, 0, true, &mut output)?;
        }
        Ok(output)
    }

    /// Format a subtree starting from a specific node.
    pub fn format_subtree(&self, tree: &NodeTree, root: NodeId) -> TreeResult<String> {
        let mut output = String::new();
        self.format_subtree_into(tree, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        tree: &NodeTree,
        id: NodeId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> TreeResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        let data = tree.node(id)?;
        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&data.tags().join("/"));

        if self.options.show_ids {
            match data.id() {
                Some(author_id) => {
                    let _ = write!(output, " #{author_id}");
                }
                None => {
                    let _ = write!(output, " ({})", data.auto_id());
                }
            }
        }

        if self.options.show_classes {
            for class in data.classes() {
                let _ = write!(output, " .{class}");
            }
        }

        if self.options.show_flags {
            if data.is_style_dirty() {
                output.push_str(" *dirty*");
            }
            if !data.is_visible() {
                output.push_str(" [hidden]");
            }
        }

        output.push('\n');

        let children = data.children();
        let child_count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.format_subtree_into(tree, child, depth + 1, i + 1 == child_count, output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Wrap a style pass in one of these to time it with a span-aware subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "trellis::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (NodeTree, NodeId) {
        let mut tree = NodeTree::new();
        let root = tree.create_node("Window");
        let panel = tree.create_child(root, "Panel").unwrap();
        tree.add_class(panel, "sidebar").unwrap();
        let label = tree.create_child(panel, "Label").unwrap();
        tree.set_id(label, Some("title")).unwrap();
        tree.create_child(root, "Button").unwrap();
        (tree, root)
    }

    #[test]
    fn format_empty_tree() {
        let tree = NodeTree::new();
        let output = NodeTreeDebug::new().format_all(&tree).unwrap();
        assert!(output.contains("Node Tree (0 total nodes)"));
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn format_hierarchy_with_flags() {
        let (mut tree, root) = sample();
        let output = NodeTreeDebug::new().format_subtree(&tree, root).unwrap();
        assert!(output.contains("window"));
        assert!(output.contains("panel"));
        assert!(output.contains(".sidebar"));
        assert!(output.contains("#title"));
        assert!(output.contains("*dirty*"));

        for id in tree.preorder(root).unwrap() {
            tree.clear_style_dirty(id).unwrap();
        }
        let output = NodeTreeDebug::new().format_subtree(&tree, root).unwrap();
        assert!(!output.contains("*dirty*"));
    }

    #[test]
    fn format_minimal_ascii() {
        let (tree, root) = sample();
        let options = TreeFormatOptions::minimal().with_style(TreeStyle::Ascii);
        let output = NodeTreeDebug::with_options(options).format_subtree(&tree, root).unwrap();
        assert!(output.contains("+-- panel"));
        assert!(output.contains("`-- button"));
        assert!(!output.contains("#title"));
        assert!(!output.contains("node-"));
    }

    #[test]
    fn max_depth_truncates() {
        let (tree, root) = sample();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let output = NodeTreeDebug::with_options(options).format_subtree(&tree, root).unwrap();
        assert!(output.contains("panel"));
        assert!(!output.contains("label"));
    }

    #[test]
    fn perf_span_enters() {
        let _span = PerfSpan::new("test_operation");
    }
}
