//! The declared-property value store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::InheritableValues;
use crate::types::{BoolKey, Color, ColorKey, FloatKey, IntKey, PropertyKey, StringKey};

/// Callback fired when a [`Style`] changes.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// A typed table of declared properties.
///
/// Each of the five property categories has its own map, and every key is
/// independently present or absent. Reads never fail: an absent key yields
/// the category fallback (see [`PropertyKey::fallback`]) or a caller-supplied
/// one.
///
/// A store may carry a change callback. [`set`](Self::set) fires it only when
/// the stored value actually changes; [`overlay`](Self::overlay) and
/// [`overlay_inheritable`](Self::overlay_inheritable) fire it once per call
/// whether or not anything changed. Declarations use the callback to
/// invalidate their style manager.
///
/// Cloning copies the values only. The clone has no change callback.
///
/// # Example
///
/// ```
/// use trellis_style::prelude::*;
///
/// let mut style = Style::new();
/// style
///     .set(ColorKey::BackgroundColor, Color(0xFF202020))
///     .set(FloatKey::BorderRadius, 4.0);
///
/// assert!(style.has(FloatKey::BorderRadius));
/// assert!(style.get(FloatKey::Opacity).is_nan());
/// assert_eq!(style.get_or(FloatKey::Opacity, 1.0), 1.0);
/// ```
#[derive(Default)]
pub struct Style {
    pub(crate) colors: HashMap<ColorKey, Color>,
    pub(crate) strings: HashMap<StringKey, String>,
    pub(crate) floats: HashMap<FloatKey, f32>,
    pub(crate) ints: HashMap<IntKey, i32>,
    pub(crate) bools: HashMap<BoolKey, bool>,
    on_change: Option<ChangeCallback>,
}

impl Style {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with every value of `other`.
    pub fn from_style(other: &Style) -> Self {
        let mut style = Self::new();
        style.overlay(other);
        style
    }

    /// Builder form of [`set`](Self::set).
    pub fn with<K: PropertyKey>(mut self, key: K, value: K::Value) -> Self {
        self.set(key, value);
        self
    }

    /// Install the change callback, replacing any previous one.
    pub fn set_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    /// Remove the change callback.
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    fn notify(&self) {
        if let Some(callback) = &self.on_change {
            callback();
        }
    }

    /// Get a value, or the category fallback when absent.
    pub fn get<K: PropertyKey>(&self, key: K) -> K::Value {
        self.get_or(key, K::fallback())
    }

    /// Get a value, or `fallback` when absent.
    pub fn get_or<K: PropertyKey>(&self, key: K, fallback: K::Value) -> K::Value {
        K::values(self).get(&key).cloned().unwrap_or(fallback)
    }

    /// Borrow a value if present.
    pub fn get_ref<K: PropertyKey>(&self, key: K) -> Option<&K::Value> {
        K::values(self).get(&key)
    }

    /// Borrow a string value; empty when absent.
    pub fn get_str(&self, key: StringKey) -> &str {
        self.strings.get(&key).map(String::as_str).unwrap_or_default()
    }

    /// Whether the key is present, regardless of its value.
    pub fn has<K: PropertyKey>(&self, key: K) -> bool {
        K::values(self).contains_key(&key)
    }

    /// Store a value.
    ///
    /// Writing the value already stored is a no-op and does not notify.
    pub fn set<K: PropertyKey>(&mut self, key: K, value: K::Value) -> &mut Self {
        let values = K::values_mut(self);
        if values.get(&key).is_some_and(|current| K::same_value(current, &value)) {
            return self;
        }
        values.insert(key, value);
        self.notify();
        self
    }

    /// Convenience for string properties.
    pub fn set_str(&mut self, key: StringKey, value: &str) -> &mut Self {
        self.set(key, value.to_string())
    }

    /// Remove a key, returning its value. Notifies if the key was present.
    pub fn remove<K: PropertyKey>(&mut self, key: K) -> Option<K::Value> {
        let removed = K::values_mut(self).remove(&key);
        if removed.is_some() {
            self.notify();
        }
        removed
    }

    /// Copy every present value of `other` into this store, overwriting.
    ///
    /// Notifies once, even if nothing changed.
    pub fn overlay(&mut self, other: &Style) -> &mut Self {
        self.overlay_category::<ColorKey>(other);
        self.overlay_category::<StringKey>(other);
        self.overlay_category::<FloatKey>(other);
        self.overlay_category::<IntKey>(other);
        self.overlay_category::<BoolKey>(other);
        self.notify();
        self
    }

    /// Copy the values of `other` whose keys appear in `table`, overwriting.
    ///
    /// Notifies once, even if nothing changed.
    pub fn overlay_inheritable(&mut self, other: &Style, table: &InheritableValues) -> &mut Self {
        self.inherit_category::<ColorKey>(other, table);
        self.inherit_category::<StringKey>(other, table);
        self.inherit_category::<FloatKey>(other, table);
        self.inherit_category::<IntKey>(other, table);
        self.inherit_category::<BoolKey>(other, table);
        self.notify();
        self
    }

    /// Copy the values of `other` whose keys are absent here.
    ///
    /// Notifies once if at least one value was copied.
    pub fn defaults(&mut self, other: &Style) -> &mut Self {
        let copied = self.defaults_category::<ColorKey>(other)
            | self.defaults_category::<StringKey>(other)
            | self.defaults_category::<FloatKey>(other)
            | self.defaults_category::<IntKey>(other)
            | self.defaults_category::<BoolKey>(other);
        if copied {
            self.notify();
        }
        self
    }

    fn overlay_category<K: PropertyKey>(&mut self, other: &Style) {
        let source = K::values(other);
        let target = K::values_mut(self);
        for (key, value) in source {
            target.insert(*key, value.clone());
        }
    }

    fn inherit_category<K: PropertyKey>(&mut self, other: &Style, table: &InheritableValues) {
        let source = K::values(other);
        let target = K::values_mut(self);
        for key in K::inheritable(table) {
            if let Some(value) = source.get(key) {
                target.insert(*key, value.clone());
            }
        }
    }

    fn defaults_category<K: PropertyKey>(&mut self, other: &Style) -> bool {
        let source = K::values(other);
        let target = K::values_mut(self);
        let mut copied = false;
        for (key, value) in source {
            if !target.contains_key(key) {
                target.insert(*key, value.clone());
                copied = true;
            }
        }
        copied
    }

    /// Whether no key is present in any category.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of present keys across all categories.
    pub fn len(&self) -> usize {
        self.colors.len() + self.strings.len() + self.floats.len() + self.ints.len() + self.bools.len()
    }

    /// Remove every value. Notifies if anything was removed.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.colors.clear();
        self.strings.clear();
        self.floats.clear();
        self.ints.clear();
        self.bools.clear();
        self.notify();
    }

    /// Present keys of one category, in no particular order.
    pub fn keys<K: PropertyKey>(&self) -> impl Iterator<Item = K> + '_ {
        K::values(self).keys().copied()
    }

    fn category_eq<K: PropertyKey>(&self, other: &Style) -> bool {
        let (ours, theirs) = (K::values(self), K::values(other));
        ours.len() == theirs.len()
            && ours
                .iter()
                .all(|(key, value)| theirs.get(key).is_some_and(|v| K::same_value(value, v)))
    }
}

impl Clone for Style {
    fn clone(&self) -> Self {
        Self {
            colors: self.colors.clone(),
            strings: self.strings.clone(),
            floats: self.floats.clone(),
            ints: self.ints.clone(),
            bools: self.bools.clone(),
            on_change: None,
        }
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.category_eq::<ColorKey>(other)
            && self.category_eq::<StringKey>(other)
            && self.category_eq::<FloatKey>(other)
            && self.category_eq::<IntKey>(other)
            && self.category_eq::<BoolKey>(other)
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("colors", &self.colors)
            .field("strings", &self.strings)
            .field("floats", &self.floats)
            .field("ints", &self.ints)
            .field("bools", &self.bools)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}
