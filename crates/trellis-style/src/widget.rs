//! Paint integration.
//!
//! Helpers that turn a computed [`Style`] into box geometry and paint calls,
//! the [`BoxFlags`] summary a node keeps after each recompute, and the
//! [`Skin`] interface for pluggable renderers.

use std::sync::Arc;

use bitflags::bitflags;

use crate::style::Style;
use crate::types::{BoolKey, Color, ColorKey, FloatKey};

/// An axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink by per-side amounts, clamping the size at zero.
    pub fn inset(&self, edges: Edges) -> Self {
        Self::new(
            self.x + edges.left,
            self.y + edges.top,
            (self.width - edges.left - edges.right).max(0.0),
            (self.height - edges.top - edges.bottom).max(0.0),
        )
    }

    /// Grow by per-side amounts.
    pub fn outset(&self, edges: Edges) -> Self {
        Self::new(
            self.x - edges.left,
            self.y - edges.top,
            self.width + edges.left + edges.right,
            self.height + edges.top + edges.bottom,
        )
    }
}

/// Per-side lengths (padding, margin, border widths).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    fn any_positive(&self) -> bool {
        self.top > 0.0 || self.right > 0.0 || self.bottom > 0.0 || self.left > 0.0
    }
}

/// Per-corner radii.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn is_zero(&self) -> bool {
        self.top_left <= 0.0
            && self.top_right <= 0.0
            && self.bottom_right <= 0.0
            && self.bottom_left <= 0.0
    }

    fn shrink(&self, amount: f32) -> Self {
        Self {
            top_left: (self.top_left - amount).max(0.0),
            top_right: (self.top_right - amount).max(0.0),
            bottom_right: (self.bottom_right - amount).max(0.0),
            bottom_left: (self.bottom_left - amount).max(0.0),
        }
    }
}

/// A defined float, or `None` when absent or NaN.
fn length(style: &Style, key: FloatKey) -> Option<f32> {
    style.get_ref(key).copied().filter(|v| !v.is_nan())
}

/// A side value overrides its shorthand; undefined reads as zero.
fn side(style: &Style, key: FloatKey, shorthand: Option<f32>) -> f32 {
    length(style, key).or(shorthand).unwrap_or(0.0)
}

fn edges(style: &Style, shorthand: FloatKey, sides: [FloatKey; 4]) -> Edges {
    let all = length(style, shorthand);
    Edges {
        top: side(style, sides[0], all),
        right: side(style, sides[1], all),
        bottom: side(style, sides[2], all),
        left: side(style, sides[3], all),
    }
}

/// Resolved padding.
pub fn padding(style: &Style) -> Edges {
    edges(
        style,
        FloatKey::Padding,
        [
            FloatKey::PaddingTop,
            FloatKey::PaddingRight,
            FloatKey::PaddingBottom,
            FloatKey::PaddingLeft,
        ],
    )
}

/// Resolved margin.
pub fn margin(style: &Style) -> Edges {
    edges(
        style,
        FloatKey::Margin,
        [
            FloatKey::MarginTop,
            FloatKey::MarginRight,
            FloatKey::MarginBottom,
            FloatKey::MarginLeft,
        ],
    )
}

/// Resolved border widths.
pub fn border_widths(style: &Style) -> Edges {
    edges(
        style,
        FloatKey::BorderWidth,
        [
            FloatKey::BorderTopWidth,
            FloatKey::BorderRightWidth,
            FloatKey::BorderBottomWidth,
            FloatKey::BorderLeftWidth,
        ],
    )
}

/// Resolved corner radii.
pub fn corner_radii(style: &Style) -> CornerRadii {
    let all = length(style, FloatKey::BorderRadius);
    CornerRadii {
        top_left: side(style, FloatKey::BorderTopLeftRadius, all),
        top_right: side(style, FloatKey::BorderTopRightRadius, all),
        bottom_right: side(style, FloatKey::BorderBottomRightRadius, all),
        bottom_left: side(style, FloatKey::BorderBottomLeftRadius, all),
    }
}

/// Opacity in 0.0-1.0; undefined means opaque.
pub fn opacity(style: &Style) -> f32 {
    length(style, FloatKey::Opacity).map_or(1.0, |v| v.clamp(0.0, 1.0))
}

fn faded(color: Color, opacity: f32) -> Color {
    if opacity >= 1.0 {
        return color;
    }
    color.with_alpha((color.a() as f32 * opacity).round() as u8)
}

/// The background color as painted, `None` when nothing would show.
fn visible_background(style: &Style) -> Option<Color> {
    let color = faded(style.get(ColorKey::BackgroundColor), opacity(style));
    (!color.is_transparent()).then_some(color)
}

/// Border widths and color as painted, `None` when nothing would show.
fn visible_border(style: &Style) -> Option<(Edges, Color)> {
    let widths = border_widths(style);
    let color = faded(style.get(ColorKey::BorderColor), opacity(style));
    (widths.any_positive() && !color.is_transparent()).then_some((widths, color))
}

/// Calculate the content rectangle inside padding and border.
pub fn content_rect(rect: Rect, style: &Style) -> Rect {
    let padding = padding(style);
    let border = border_widths(style);
    rect.inset(Edges {
        top: padding.top + border.top,
        right: padding.right + border.right,
        bottom: padding.bottom + border.bottom,
        left: padding.left + border.left,
    })
}

/// Calculate the border box size for a given content size.
///
/// This is the inverse of [`content_rect`].
pub fn border_box_size(content_width: f32, content_height: f32, style: &Style) -> (f32, f32) {
    let padding = padding(style);
    let border = border_widths(style);
    (
        content_width + padding.horizontal() + border.horizontal(),
        content_height + padding.vertical() + border.vertical(),
    )
}

/// Calculate the margin box around a border box.
pub fn margin_rect(border_rect: Rect, style: &Style) -> Rect {
    border_rect.outset(margin(style))
}

bitflags! {
    /// Paint decisions derived from a node's computed style.
    ///
    /// Recomputed after every style recompute so paint code can skip work
    /// without reading the style again.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BoxFlags: u8 {
        /// [`paint_background`] draws something.
        const DRAW_BACKGROUND = 0b0000_0001;
        /// [`paint_border`] draws something.
        const DRAW_BORDER     = 0b0000_0010;
        /// Some corner has a radius.
        const ROUNDED_CORNERS = 0b0000_0100;
        /// Opacity is below one.
        const TRANSLUCENT     = 0b0000_1000;
        /// Shapes are antialiased.
        const ANTIALIAS       = 0b0001_0000;
    }
}

impl BoxFlags {
    /// Derive the flags from a computed style.
    pub fn from_style(style: &Style) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::DRAW_BACKGROUND, visible_background(style).is_some());
        flags.set(Self::DRAW_BORDER, visible_border(style).is_some());
        flags.set(Self::ROUNDED_CORNERS, !corner_radii(style).is_zero());
        flags.set(Self::TRANSLUCENT, opacity(style) < 1.0);
        flags.set(Self::ANTIALIAS, style.get(BoolKey::Antialias));
        flags
    }
}

/// Paint context abstraction for style rendering.
///
/// Rendering backends implement this; the style crate only issues calls.
pub trait StylePaintContext {
    /// Fill a rectangle with a color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Fill a rounded rectangle.
    fn fill_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color);

    /// Draw a border around a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Draw a rounded border.
    fn stroke_rounded_rect(&mut self, rect: Rect, radii: CornerRadii, color: Color, width: f32);

    /// Toggle antialiasing for subsequent shapes.
    fn set_antialias(&mut self, _enabled: bool) {}
}

/// Paint the background color within the border box.
pub fn paint_background(ctx: &mut dyn StylePaintContext, rect: Rect, style: &Style) {
    let Some(color) = visible_background(style) else {
        return;
    };

    let radii = corner_radii(style);
    if radii.is_zero() {
        ctx.fill_rect(rect, color);
    } else {
        ctx.fill_rounded_rect(rect, radii, color);
    }
}

/// Paint the border inside the border box.
///
/// Equal widths on all sides are stroked along the box, following the
/// corner radii. Mixed widths fill one band per side with square corners.
pub fn paint_border(ctx: &mut dyn StylePaintContext, rect: Rect, style: &Style) {
    let Some((widths, color)) = visible_border(style) else {
        return;
    };

    let uniform = widths.top == widths.right
        && widths.top == widths.bottom
        && widths.top == widths.left;
    if !uniform {
        paint_border_sides(ctx, rect, widths, color);
        return;
    }

    // Strokes are centered on the path.
    let width = widths.top;
    let inset = width / 2.0;
    let border_rect = Rect::new(
        rect.x + inset,
        rect.y + inset,
        (rect.width - width).max(0.0),
        (rect.height - width).max(0.0),
    );

    let radii = corner_radii(style);
    if radii.is_zero() {
        ctx.stroke_rect(border_rect, color, width);
    } else {
        ctx.stroke_rounded_rect(border_rect, radii.shrink(inset), color, width);
    }
}

fn paint_border_sides(ctx: &mut dyn StylePaintContext, rect: Rect, widths: Edges, color: Color) {
    let middle = (rect.height - widths.vertical()).max(0.0);
    let bands = [
        Rect::new(rect.x, rect.y, rect.width, widths.top),
        Rect::new(rect.x, rect.y + rect.height - widths.bottom, rect.width, widths.bottom),
        Rect::new(rect.x, rect.y + widths.top, widths.left, middle),
        Rect::new(rect.x + rect.width - widths.right, rect.y + widths.top, widths.right, middle),
    ];
    for band in bands {
        if band.width > 0.0 && band.height > 0.0 {
            ctx.fill_rect(band, color);
        }
    }
}

/// Paint background and border.
pub fn paint_styled_box(ctx: &mut dyn StylePaintContext, rect: Rect, style: &Style) {
    ctx.set_antialias(style.get(BoolKey::Antialias));
    paint_background(ctx, rect, style);
    paint_border(ctx, rect, style);
}

/// A pluggable renderer for a node's box, chosen by the `skin` property.
pub trait Skin {
    fn render(&self, ctx: &mut dyn StylePaintContext, rect: Rect, style: &Style);
}

/// Creates a fresh skin instance.
pub type SkinFactory = Arc<dyn Fn() -> Box<dyn Skin> + Send + Sync>;

/// The default skin: background then border.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxSkin;

impl Skin for BoxSkin {
    fn render(&self, ctx: &mut dyn StylePaintContext, rect: Rect, style: &Style) {
        paint_styled_box(ctx, rect, style);
    }
}
