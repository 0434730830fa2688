//! Property keys.
//!
//! Every stylable property is a variant of one of five category enums. A key
//! is unique only inside its category: each category lives in its own map in
//! [`Style`], so `ColorKey::Color` and `FloatKey::Opacity` never collide.
//!
//! Each key carries a kebab-case CSS-like name used for display and lookup.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::Color;
use crate::error::Error;
use crate::style::{InheritableValues, Style};

/// The five independent property categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    /// Packed ARGB colors.
    Color,
    /// Free-form strings (enumerated keywords, names, paths).
    String,
    /// 32-bit floats; absent reads as NaN ("undefined").
    Float,
    /// 32-bit signed integers.
    Integer,
    /// Booleans.
    Boolean,
}

impl PropertyCategory {
    /// Lower-case category name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::String => "string",
            Self::Float => "float",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// A property key of one category, bound to that category's value type.
///
/// The hidden accessors wire each category to its map inside [`Style`] and
/// to its key list inside [`InheritableValues`]; they are implemented by the
/// key enums of this module only.
pub trait PropertyKey: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// The value stored for keys of this category.
    type Value: Clone + fmt::Debug + PartialEq + Send + Sync;

    /// The category of this key type.
    const CATEGORY: PropertyCategory;

    /// Every key of the category.
    fn all() -> &'static [Self];

    /// The kebab-case property name.
    fn name(self) -> &'static str;

    /// Value returned by [`Style::get`] when the key is absent.
    fn fallback() -> Self::Value;

    /// Value comparison used by [`Style::set`] to skip no-op writes.
    fn same_value(a: &Self::Value, b: &Self::Value) -> bool {
        a == b
    }

    /// Look a key up by name.
    ///
    /// Accepts kebab-case, snake_case and camelCase spellings in any case.
    fn from_name(name: &str) -> Option<Self> {
        let normalized = normalize_property_name(name);
        Self::all().iter().copied().find(|key| key.name() == normalized)
    }

    /// Like [`from_name`](Self::from_name), reporting unknown names as errors.
    fn parse_name(name: &str) -> crate::Result<Self> {
        Self::from_name(name).ok_or_else(|| Error::unknown_property(Self::CATEGORY.name(), name))
    }

    #[doc(hidden)]
    fn values(style: &Style) -> &HashMap<Self, Self::Value>;

    #[doc(hidden)]
    fn values_mut(style: &mut Style) -> &mut HashMap<Self, Self::Value>;

    #[doc(hidden)]
    fn inheritable(table: &InheritableValues) -> &[Self];
}

/// Convert `backgroundColor`, `background_color` or `Background-Color` to
/// `background-color`.
pub fn normalize_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.trim().chars() {
        if ch == '_' || ch == '-' {
            out.push('-');
            prev_lower = false;
        } else if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

fn same_float(a: &f32, b: &f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

macro_rules! property_keys {
    (
        $(#[$meta:meta])*
        $name:ident: $value:ty = $fallback:expr, $category:ident, $field:ident
        $(, same = $same:path)?
        {
            $( $(#[$vmeta:meta])* $variant:ident => $css:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every key of this category, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];
        }

        impl PropertyKey for $name {
            type Value = $value;

            const CATEGORY: PropertyCategory = PropertyCategory::$category;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $css, )+
                }
            }

            fn fallback() -> $value {
                $fallback
            }

            $(
                fn same_value(a: &$value, b: &$value) -> bool {
                    $same(a, b)
                }
            )?

            fn values(style: &Style) -> &HashMap<Self, $value> {
                &style.$field
            }

            fn values_mut(style: &mut Style) -> &mut HashMap<Self, $value> {
                &mut style.$field
            }

            fn inheritable(table: &InheritableValues) -> &[Self] {
                &table.$field
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

property_keys! {
    /// Color properties.
    ColorKey: Color = Color(0), Color, colors {
        /// Foreground (text and glyph) color.
        Color => "color",
        BackgroundColor => "background-color",
        BorderColor => "border-color",
        PlaceholderColor => "placeholder-color",
        SelectionColor => "selection-color",
        CaretColor => "caret-color",
        ScrollbarColor => "scrollbar-color",
        ScrollbarTrackColor => "scrollbar-track-color",
        ShadowColor => "shadow-color",
    }
}

property_keys! {
    /// String properties: keywords for layout and paint, and resource names.
    StringKey: String = String::new(), String, strings {
        /// Name of a font registered with the style manager.
        FontName => "font-name",
        Cursor => "cursor",
        /// `left`, `center` or `right`.
        TextAlign => "text-align",
        /// `top`, `middle` or `bottom`.
        VerticalAlign => "vertical-align",
        /// `row`, `row-reverse`, `column` or `column-reverse`.
        FlexDirection => "flex-direction",
        JustifyContent => "justify-content",
        AlignItems => "align-items",
        AlignSelf => "align-self",
        AlignContent => "align-content",
        FlexWrap => "flex-wrap",
        /// `relative` or `absolute`.
        Position => "position",
        Overflow => "overflow",
        Display => "display",
        /// `horizontal` or `vertical`.
        Orientation => "orientation",
        ScrollDirection => "scroll-direction",
        BackgroundImage => "background-image",
        /// Name of a skin factory registered with the style manager.
        Skin => "skin",
    }
}

property_keys! {
    /// Float properties: box model, flex layout, typography metrics, effects.
    FloatKey: f32 = f32::NAN, Float, floats, same = same_float {
        Opacity => "opacity",
        FontSize => "font-size",
        LineHeight => "line-height",
        LetterSpacing => "letter-spacing",
        BorderWidth => "border-width",
        BorderTopWidth => "border-top-width",
        BorderRightWidth => "border-right-width",
        BorderBottomWidth => "border-bottom-width",
        BorderLeftWidth => "border-left-width",
        BorderRadius => "border-radius",
        BorderTopLeftRadius => "border-top-left-radius",
        BorderTopRightRadius => "border-top-right-radius",
        BorderBottomRightRadius => "border-bottom-right-radius",
        BorderBottomLeftRadius => "border-bottom-left-radius",
        Padding => "padding",
        PaddingTop => "padding-top",
        PaddingRight => "padding-right",
        PaddingBottom => "padding-bottom",
        PaddingLeft => "padding-left",
        Margin => "margin",
        MarginTop => "margin-top",
        MarginRight => "margin-right",
        MarginBottom => "margin-bottom",
        MarginLeft => "margin-left",
        Width => "width",
        Height => "height",
        MinWidth => "min-width",
        MinHeight => "min-height",
        MaxWidth => "max-width",
        MaxHeight => "max-height",
        FlexGrow => "flex-grow",
        FlexShrink => "flex-shrink",
        FlexBasis => "flex-basis",
        AspectRatio => "aspect-ratio",
        Left => "left",
        Top => "top",
        Right => "right",
        Bottom => "bottom",
        ShadowBlur => "shadow-blur",
        ShadowOffsetX => "shadow-offset-x",
        ShadowOffsetY => "shadow-offset-y",
        ScrollbarWidth => "scrollbar-width",
    }
}

property_keys! {
    /// Integer properties.
    IntKey: i32 = 0, Integer, ints {
        /// CSS-style weight, 100-900.
        FontWeight => "font-weight",
        ZIndex => "z-index",
        TabIndex => "tab-index",
        /// Maximum number of text lines; 0 means unlimited.
        MaxLines => "max-lines",
    }
}

property_keys! {
    /// Boolean properties.
    BoolKey: bool = false, Boolean, bools {
        /// Antialias shapes (backgrounds, borders).
        Antialias => "antialias",
        TextAntialias => "text-antialias",
        ClipChildren => "clip-children",
        WordWrap => "word-wrap",
        TextEllipsis => "text-ellipsis",
        ScrollbarVisible => "scrollbar-visible",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &key in FloatKey::ALL {
            assert_eq!(FloatKey::from_name(key.name()), Some(key));
        }
        for &key in ColorKey::ALL {
            assert_eq!(ColorKey::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn alternate_spellings() {
        assert_eq!(ColorKey::from_name("backgroundColor"), Some(ColorKey::BackgroundColor));
        assert_eq!(ColorKey::from_name("BACKGROUND_COLOR"), Some(ColorKey::BackgroundColor));
        assert_eq!(FloatKey::from_name("border-top-left-radius"), Some(FloatKey::BorderTopLeftRadius));
        assert_eq!(FloatKey::from_name("shadowOffsetX"), Some(FloatKey::ShadowOffsetX));
        assert_eq!(FloatKey::from_name("colour"), None);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert_eq!(IntKey::parse_name("zIndex"), Ok(IntKey::ZIndex));
        assert_eq!(
            BoolKey::parse_name("opacity"),
            Err(Error::unknown_property("boolean", "opacity"))
        );
    }

    #[test]
    fn fallbacks() {
        assert!(FloatKey::fallback().is_nan());
        assert_eq!(ColorKey::fallback(), Color(0));
        assert_eq!(StringKey::fallback(), "");
        assert_eq!(IntKey::fallback(), 0);
        assert!(!BoolKey::fallback());
    }

    #[test]
    fn float_comparison_treats_nan_as_equal() {
        assert!(FloatKey::same_value(&f32::NAN, &f32::NAN));
        assert!(FloatKey::same_value(&1.0, &1.0));
        assert!(!FloatKey::same_value(&1.0, &f32::NAN));
    }
}
