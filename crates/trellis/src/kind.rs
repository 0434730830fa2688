//! Node kinds and their style capabilities.
//!
//! A kind decides three things for the cascade: which keys a node inherits
//! from its parent, which default values fill what the cascade leaves
//! absent, and how the computed style is summarized into [`BoxFlags`] after
//! each recompute.

use trellis_style::style::{InheritableValues, Style};
use trellis_style::types::{BoolKey, Color, ColorKey, FloatKey, StringKey};
use trellis_style::widget::BoxFlags;

/// Static description of a node kind.
#[derive(Debug)]
pub struct KindCapabilities {
    /// Kind name, also the node's primary tag.
    pub name: &'static str,
    /// Keys taken from the parent's computed style.
    pub inheritable: InheritableValues,
    /// Builds the default store of a new node.
    pub default_style: fn() -> Style,
    /// Runs after every recompute.
    pub style_updated: fn(&Style) -> BoxFlags,
}

/// The kind of a scene node.
///
/// # Example
///
/// ```
/// use trellis::{KindCapabilities, NodeKind};
/// use trellis::style::style::{InheritableValues, Style};
/// use trellis::style::widget::BoxFlags;
///
/// static BADGE: KindCapabilities = KindCapabilities {
///     name: "badge",
///     inheritable: InheritableValues::TEXT,
///     default_style: Style::new,
///     style_updated: BoxFlags::from_style,
/// };
///
/// assert_eq!(NodeKind::Custom(&BADGE).name(), "badge");
/// assert_eq!(NodeKind::Text.name(), "text");
/// ```
#[derive(Debug, Clone, Copy)]
pub enum NodeKind {
    /// Layout-only box; inherits nothing.
    Container,
    /// Static text.
    Text,
    /// Editable text.
    Input,
    /// A kind defined outside this crate.
    Custom(&'static KindCapabilities),
}

impl NodeKind {
    pub fn capabilities(&self) -> &'static KindCapabilities {
        match self {
            Self::Container => &CONTAINER,
            Self::Text => &TEXT,
            Self::Input => &INPUT,
            Self::Custom(caps) => caps,
        }
    }

    pub fn name(&self) -> &'static str {
        self.capabilities().name
    }
}

/// Minimum height of a single text line.
pub const TEXT_MIN_HEIGHT: f32 = 16.0;

/// Minimum height of an input field.
pub const INPUT_MIN_HEIGHT: f32 = 24.0;

/// Frame width of an input field unless styled otherwise.
pub const INPUT_BORDER_WIDTH: f32 = 1.0;

static CONTAINER: KindCapabilities = KindCapabilities {
    name: "container",
    inheritable: InheritableValues::NONE,
    default_style: Style::new,
    style_updated: BoxFlags::from_style,
};

static TEXT: KindCapabilities = KindCapabilities {
    name: "text",
    inheritable: InheritableValues::TEXT,
    default_style: text_defaults,
    style_updated: BoxFlags::from_style,
};

static INPUT: KindCapabilities = KindCapabilities {
    name: "input",
    inheritable: InheritableValues::INPUT,
    default_style: input_defaults,
    style_updated: BoxFlags::from_style,
};

fn text_defaults() -> Style {
    Style::new()
        .with(FloatKey::MinHeight, TEXT_MIN_HEIGHT)
        .with(BoolKey::TextAntialias, true)
}

fn input_defaults() -> Style {
    Style::new()
        .with(FloatKey::MinHeight, INPUT_MIN_HEIGHT)
        .with(StringKey::Cursor, "text".to_string())
        .with(BoolKey::TextAntialias, true)
        .with(BoolKey::ClipChildren, true)
        .with(FloatKey::BorderWidth, INPUT_BORDER_WIDTH)
        .with(ColorKey::BorderColor, Color::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_kinds() {
        assert_eq!(NodeKind::Container.name(), "container");
        assert!(NodeKind::Container.capabilities().inheritable.is_empty());
        assert_eq!(NodeKind::Input.capabilities().inheritable, InheritableValues::INPUT);

        let text = (NodeKind::Text.capabilities().default_style)();
        assert_eq!(text.get(FloatKey::MinHeight), TEXT_MIN_HEIGHT);
        assert!((NodeKind::Container.capabilities().default_style)().is_empty());
    }

    #[test]
    fn input_frame_flag() {
        let caps = NodeKind::Input.capabilities();
        let defaults = (caps.default_style)();
        assert!((caps.style_updated)(&defaults).contains(BoxFlags::DRAW_BORDER));

        // A transparent border color hides the frame, and the flag follows.
        let hidden = Style::new()
            .with(ColorKey::BorderColor, Color::TRANSPARENT)
            .with(FloatKey::BorderWidth, INPUT_BORDER_WIDTH);
        assert!(!(caps.style_updated)(&hidden).contains(BoxFlags::DRAW_BORDER));
    }
}
