//! Cascade: combining declarations, inheritance, inline and default values.

use trellis_core::logging::targets;

use crate::node::StyledNode;
use crate::rules::Declaration;
use crate::selector::SelectorMatcher;
use crate::style::{InheritableValues, Style};

/// Per-node inputs to [`StyleManager::compute_style`](super::StyleManager::compute_style)
/// besides the node itself.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    /// The parent's computed style, already up to date.
    pub parent_style: Option<&'a Style>,
    /// The node's inline style (highest priority).
    pub inline_style: Option<&'a Style>,
    /// The node kind's default values (lowest priority, fill-only).
    pub default_style: Option<&'a Style>,
    /// Keys the node kind inherits from its parent.
    pub inheritable: &'a InheritableValues,
}

impl<'a> StyleContext<'a> {
    /// A context with no parent, inline or default style.
    pub fn new(inheritable: &'a InheritableValues) -> Self {
        Self {
            parent_style: None,
            inline_style: None,
            default_style: None,
            inheritable,
        }
    }

    pub fn with_parent(mut self, style: &'a Style) -> Self {
        self.parent_style = Some(style);
        self
    }

    pub fn with_inline(mut self, style: &'a Style) -> Self {
        self.inline_style = Some(style);
        self
    }

    pub fn with_defaults(mut self, style: &'a Style) -> Self {
        self.default_style = Some(style);
        self
    }
}

/// Compute a fresh style for `node`.
///
/// Precedence from lowest to highest: the global declaration, inherited
/// parent values, matching declarations by ascending weight (ties in
/// declaration order), the inline style. Default values fill whatever is
/// still absent.
pub(crate) fn cascade<N: StyledNode>(
    matcher: SelectorMatcher,
    global: Option<&Declaration>,
    declarations: &[Declaration],
    node: &N,
    context: &StyleContext<'_>,
) -> Style {
    let mut computed = Style::new();

    if let Some(global) = global {
        computed.overlay(global.style());
    }

    if let Some(parent) = context.parent_style {
        computed.overlay_inheritable(parent, context.inheritable);
    }

    let mut matched: Vec<&Declaration> = declarations
        .iter()
        .filter(|decl| matcher.matches(decl.selector(), node))
        .collect();
    matched.sort_by_key(|decl| decl.weight());

    for decl in &matched {
        computed.overlay(decl.style());
    }

    if let Some(inline) = context.inline_style {
        computed.overlay(inline);
    }

    if let Some(defaults) = context.default_style {
        computed.defaults(defaults);
    }

    tracing::trace!(
        target: targets::CASCADE,
        matched = matched.len(),
        values = computed.len(),
        "computed style"
    );
    computed
}
