//! Trellis: a retained node scene with CSS-like style resolution.
//!
//! This is the umbrella crate. It re-exports the node tree from
//! `trellis-core`, exposes the style engine as [`style`], and adds
//! [`Scene`], which ties nodes, node kinds and style managers together and
//! runs the per-frame style pass.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut scene = Scene::new();
//! let root = scene.create_node(NodeKind::Container);
//! let button = scene.create_child(root, NodeKind::Container)?;
//! scene.tree_mut().push_tag(button, "Button")?;
//!
//! let manager = SharedStyleManager::default();
//! manager.write().style("Button").set(ColorKey::BackgroundColor, Color::WHITE);
//! manager.write().style("Button:hover").set(ColorKey::BackgroundColor, Color::GRAY);
//! scene.set_style_manager(root, manager)?;
//!
//! scene.update_styles()?;
//! assert_eq!(scene.computed_style(button)?.get(ColorKey::BackgroundColor), Color::WHITE);
//!
//! scene.tree_mut().set_hovered(button, true)?;
//! scene.update_styles()?;
//! assert_eq!(scene.computed_style(button)?.get(ColorKey::BackgroundColor), Color::GRAY);
//! # Ok::<(), trellis::SceneError>(())
//! ```

pub use trellis_core::*;

/// Style engine module.
pub mod style {
    pub use trellis_style::*;
}

mod error;
mod kind;
mod scene;

pub use error::{SceneError, SceneResult};
pub use kind::{INPUT_BORDER_WIDTH, INPUT_MIN_HEIGHT, KindCapabilities, NodeKind, TEXT_MIN_HEIGHT};
pub use scene::Scene;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::{KindCapabilities, NodeKind, Scene, SceneError, SceneResult};
    pub use trellis_core::{NodeId, NodeState, NodeTree};
    pub use trellis_style::prelude::*;
}
