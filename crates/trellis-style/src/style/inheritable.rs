//! Per-kind inheritance tables.

use std::borrow::Cow;

use crate::types::{BoolKey, ColorKey, FloatKey, IntKey, PropertyKey, StringKey};

/// The keys a node kind takes from its parent's computed style.
///
/// Inheritance is never implicit: a key flows from parent to child only when
/// it is listed here for the child's kind. Kinds share the built-in tables
/// through the borrowed constants and build custom ones with the `with_*`
/// methods.
///
/// # Example
///
/// ```
/// use trellis_style::prelude::*;
///
/// let table = InheritableValues::TEXT.clone().with_color(ColorKey::BorderColor);
/// assert!(table.contains(ColorKey::Color));
/// assert!(table.contains(ColorKey::BorderColor));
/// assert!(!InheritableValues::NONE.contains(ColorKey::Color));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InheritableValues {
    pub colors: Cow<'static, [ColorKey]>,
    pub strings: Cow<'static, [StringKey]>,
    pub floats: Cow<'static, [FloatKey]>,
    pub ints: Cow<'static, [IntKey]>,
    pub bools: Cow<'static, [BoolKey]>,
}

impl InheritableValues {
    /// Inherit nothing.
    pub const NONE: Self = Self {
        colors: Cow::Borrowed(&[]),
        strings: Cow::Borrowed(&[]),
        floats: Cow::Borrowed(&[]),
        ints: Cow::Borrowed(&[]),
        bools: Cow::Borrowed(&[]),
    };

    /// Typography for text-bearing nodes.
    pub const TEXT: Self = Self {
        colors: Cow::Borrowed(&[ColorKey::Color]),
        strings: Cow::Borrowed(&[StringKey::FontName, StringKey::TextAlign]),
        floats: Cow::Borrowed(&[
            FloatKey::FontSize,
            FloatKey::LineHeight,
            FloatKey::LetterSpacing,
        ]),
        ints: Cow::Borrowed(&[IntKey::FontWeight]),
        bools: Cow::Borrowed(&[BoolKey::TextAntialias]),
    };

    /// Typography plus editing colors and cursor for input nodes.
    pub const INPUT: Self = Self {
        colors: Cow::Borrowed(&[
            ColorKey::Color,
            ColorKey::PlaceholderColor,
            ColorKey::SelectionColor,
            ColorKey::CaretColor,
        ]),
        strings: Cow::Borrowed(&[StringKey::FontName, StringKey::TextAlign, StringKey::Cursor]),
        floats: Cow::Borrowed(&[
            FloatKey::FontSize,
            FloatKey::LineHeight,
            FloatKey::LetterSpacing,
        ]),
        ints: Cow::Borrowed(&[IntKey::FontWeight]),
        bools: Cow::Borrowed(&[BoolKey::TextAntialias, BoolKey::Antialias]),
    };

    /// An empty table.
    pub fn new() -> Self {
        Self::NONE
    }

    /// Whether `key` is inherited.
    pub fn contains<K: PropertyKey>(&self, key: K) -> bool {
        K::inheritable(self).contains(&key)
    }

    /// Whether no key is inherited.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.strings.is_empty()
            && self.floats.is_empty()
            && self.ints.is_empty()
            && self.bools.is_empty()
    }

    pub fn with_color(mut self, key: ColorKey) -> Self {
        push_unique(&mut self.colors, key);
        self
    }

    pub fn with_string(mut self, key: StringKey) -> Self {
        push_unique(&mut self.strings, key);
        self
    }

    pub fn with_float(mut self, key: FloatKey) -> Self {
        push_unique(&mut self.floats, key);
        self
    }

    pub fn with_int(mut self, key: IntKey) -> Self {
        push_unique(&mut self.ints, key);
        self
    }

    pub fn with_bool(mut self, key: BoolKey) -> Self {
        push_unique(&mut self.bools, key);
        self
    }
}

fn push_unique<K: PropertyKey>(list: &mut Cow<'static, [K]>, key: K) {
    if !list.contains(&key) {
        list.to_mut().push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_extends_text() {
        let text = &InheritableValues::TEXT;
        let input = &InheritableValues::INPUT;
        assert!(text.colors.iter().all(|k| input.colors.contains(k)));
        assert!(text.strings.iter().all(|k| input.strings.contains(k)));
        assert!(text.floats.iter().all(|k| input.floats.contains(k)));
        assert!(input.contains(StringKey::Cursor));
        assert!(!text.contains(StringKey::Cursor));
    }

    #[test]
    fn builders_do_not_duplicate() {
        let table = InheritableValues::new()
            .with_float(FloatKey::Opacity)
            .with_float(FloatKey::Opacity);
        assert_eq!(table.floats.len(), 1);
        assert!(InheritableValues::NONE.is_empty());
        assert!(!table.is_empty());
    }
}
