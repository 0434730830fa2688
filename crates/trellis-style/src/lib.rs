//! CSS-like style resolution for Trellis.
//!
//! This crate turns author declarations into per-node computed styles:
//!
//! - **Value Store**: [`Style`](style::Style), a typed table over five property
//!   categories with overlay, inheritance and default merges
//! - **Selectors**: tag, `#id`, `.class` and `:pseudo` links chained by
//!   descendant and `>` child combinators
//! - **Cascade**: weight-ordered declarations, per-kind inheritance, inline
//!   overrides and kind defaults
//! - **Style Manager**: declaration registry, fonts, skins and the valid flag
//!   that drives full versus incremental recomputes
//!
//! # Example
//!
//! ```
//! use trellis_core::NodeTree;
//! use trellis_style::prelude::*;
//!
//! let mut manager = StyleManager::new();
//! manager.style("Panel Label").set(FloatKey::FontSize, 14.0);
//!
//! let mut tree = NodeTree::new();
//! let panel = tree.create_node("Panel");
//! let row = tree.create_child(panel, "Row")?;
//! let label = tree.create_child(row, "Label")?;
//!
//! let node = NodeRef::new(&tree, label).unwrap();
//! let style = manager.compute_style(&node, &StyleContext::new(&InheritableValues::TEXT));
//! assert_eq!(style.get(FloatKey::FontSize), 14.0);
//! # Ok::<(), trellis_core::TreeError>(())
//! ```

pub mod node;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod style;
pub mod types;
pub mod widget;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::node::{NodeRef, StyledNode};
    pub use crate::resolve::{SharedStyleManager, StyleContext, StyleManager, StyleManagerConfig};
    pub use crate::rules::Declaration;
    pub use crate::selector::{PseudoStates, Selector, SelectorMatcher};
    pub use crate::style::{InheritableValues, Style};
    pub use crate::types::{
        BoolKey, Color, ColorKey, FloatKey, FontHandle, IntKey, PropertyKey, StringKey,
    };
    pub use crate::widget::{
        BoxFlags, BoxSkin, Rect, Skin, StylePaintContext, content_rect, paint_background,
        paint_border, paint_styled_box,
    };
}
