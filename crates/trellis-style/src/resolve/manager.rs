//! The per-root style manager.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use trellis_core::logging::targets;

use super::cascade::{StyleContext, cascade};
use super::config::StyleManagerConfig;
use crate::error::{Error, Result};
use crate::node::StyledNode;
use crate::rules::Declaration;
use crate::selector::{Selector, SelectorMatcher};
use crate::style::{ChangeCallback, Style};
use crate::types::{FontHandle, StringKey};
use crate::widget::{Skin, SkinFactory};

/// Selector text that addresses the global declaration.
pub const GLOBAL_SELECTOR: &str = "*";

#[derive(Clone, Copy)]
enum Slot {
    Global,
    Registry(usize),
}

/// Owns the declarations, fonts and skins for one window or root.
///
/// Declarations are created on first access by selector text and keyed by
/// the trimmed, lower-cased text, so `"Button"` and `"button"` address the
/// same declaration. The `"*"` declaration is kept apart from the others:
/// it is applied first, before inherited values, and never takes part in
/// weight ordering.
///
/// Any change to a declaration's values clears the manager's valid flag,
/// which tells the frame pass to recompute every node instead of only the
/// dirty ones. A new manager starts invalid.
///
/// # Example
///
/// ```
/// use trellis_core::NodeTree;
/// use trellis_style::prelude::*;
///
/// let mut manager = StyleManager::new();
/// manager.style("*").set(ColorKey::Color, Color::BLACK);
/// manager.style("Button:hover").set(ColorKey::Color, Color::RED);
///
/// let mut tree = NodeTree::new();
/// let button = tree.create_node("Button");
/// tree.set_hovered(button, true)?;
///
/// let node = NodeRef::new(&tree, button).unwrap();
/// let computed = manager.compute_style(&node, &StyleContext::new(&InheritableValues::NONE));
/// assert_eq!(computed.get(ColorKey::Color), Color::RED);
/// # Ok::<(), trellis_core::TreeError>(())
/// ```
pub struct StyleManager {
    config: StyleManagerConfig,
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
    global: Option<Declaration>,
    next_order: usize,
    dummy: Style,
    fonts: HashMap<String, FontHandle>,
    skins: HashMap<String, SkinFactory>,
    valid: Arc<AtomicBool>,
}

impl StyleManager {
    /// Create an empty manager with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StyleManagerConfig::default())
    }

    /// Create an empty manager.
    pub fn with_config(config: StyleManagerConfig) -> Self {
        Self {
            config,
            declarations: Vec::new(),
            index: HashMap::new(),
            global: None,
            next_order: 0,
            dummy: Style::new(),
            fonts: HashMap::new(),
            skins: HashMap::new(),
            valid: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &StyleManagerConfig {
        &self.config
    }

    fn key(text: &str) -> String {
        text.trim().to_lowercase()
    }

    fn invalidator(&self) -> ChangeCallback {
        let valid = Arc::clone(&self.valid);
        Arc::new(move || valid.store(false, Ordering::Release))
    }

    fn ensure(&mut self, text: &str) -> Option<Slot> {
        let key = Self::key(text);
        if key == GLOBAL_SELECTOR {
            return Some(Slot::Global);
        }
        if let Some(&index) = self.index.get(&key) {
            return Some(Slot::Registry(index));
        }

        let selector = Selector::parse(&key)?;
        let order = self.next_order;
        self.next_order += 1;
        let declaration = Declaration::new(selector, order, Some(self.invalidator()));
        tracing::debug!(
            target: targets::CASCADE,
            selector = %key,
            weight = declaration.weight(),
            order,
            "created declaration"
        );

        let index = self.declarations.len();
        self.declarations.push(declaration);
        self.index.insert(key, index);
        Some(Slot::Registry(index))
    }

    fn slot_style(&mut self, slot: Slot) -> &mut Style {
        match slot {
            Slot::Global => {
                let on_change = self.invalidator();
                self.global
                    .get_or_insert_with(|| Declaration::new(Selector::default(), 0, Some(on_change)))
                    .style_mut()
            }
            Slot::Registry(index) => self.declarations[index].style_mut(),
        }
    }

    /// Get or create the declaration for `selector` and return its values.
    ///
    /// Text that parses to no selector yields a freshly emptied scratch store
    /// that no node ever reads, so authoring code can write to it without
    /// checking.
    pub fn style(&mut self, selector: &str) -> &mut Style {
        match self.ensure(selector) {
            Some(slot) => self.slot_style(slot),
            None => {
                if self.config.warn_on_invalid_selector {
                    tracing::warn!(
                        target: targets::CASCADE,
                        selector,
                        "invalid selector, writes will be ignored"
                    );
                }
                debug_assert!(
                    !self.config.assert_on_invalid_selector,
                    "invalid selector {selector:?}"
                );
                self.dummy = Style::new();
                &mut self.dummy
            }
        }
    }

    /// Like [`style`](Self::style), but reports unparseable text.
    pub fn try_style(&mut self, selector: &str) -> Result<&mut Style> {
        match self.ensure(selector) {
            Some(slot) => Ok(self.slot_style(slot)),
            None => Err(Error::invalid_selector(selector, "no selector segment")),
        }
    }

    /// Look up an existing declaration.
    pub fn declaration(&self, selector: &str) -> Option<&Declaration> {
        let key = Self::key(selector);
        if key == GLOBAL_SELECTOR {
            return self.global.as_ref();
        }
        self.index.get(&key).map(|&index| &self.declarations[index])
    }

    /// The `"*"` declaration, if created.
    pub fn global_declaration(&self) -> Option<&Declaration> {
        self.global.as_ref()
    }

    /// Declarations other than `"*"`, in creation order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    /// Number of declarations, including `"*"`.
    pub fn declaration_count(&self) -> usize {
        self.declarations.len() + usize::from(self.global.is_some())
    }

    /// Remove a declaration. Returns whether it existed.
    pub fn remove_style(&mut self, selector: &str) -> bool {
        let key = Self::key(selector);
        let removed = if key == GLOBAL_SELECTOR {
            self.global.take().is_some()
        } else if let Some(index) = self.index.remove(&key) {
            self.declarations.remove(index);
            for slot in self.index.values_mut() {
                if *slot > index {
                    *slot -= 1;
                }
            }
            true
        } else {
            false
        };

        if removed {
            tracing::debug!(target: targets::CASCADE, selector = %key, "removed declaration");
            self.invalidate();
        }
        removed
    }

    /// Remove every declaration. Fonts and skins are kept.
    pub fn clear(&mut self) {
        self.declarations.clear();
        self.index.clear();
        self.global = None;
        tracing::debug!(target: targets::CASCADE, "cleared declarations");
        self.invalidate();
    }

    /// Compute a fresh style for `node`.
    ///
    /// The parent's style in `context` must already be up to date.
    pub fn compute_style<N: StyledNode>(&self, node: &N, context: &StyleContext<'_>) -> Style {
        cascade(
            self.matcher(),
            self.global.as_ref(),
            &self.declarations,
            node,
            context,
        )
    }

    /// The matcher configured for this manager.
    pub fn matcher(&self) -> SelectorMatcher {
        SelectorMatcher::new(self.config.depth_fast_path)
    }

    /// Whether no declaration changed since [`mark_valid`](Self::mark_valid).
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Force a full recompute on the next frame pass.
    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    /// Mark the manager valid.
    pub fn mark_valid(&self) {
        self.valid.store(true, Ordering::Release);
    }

    /// Mark the manager valid and return whether it already was.
    ///
    /// The frame pass calls this before it recomputes anything, so a
    /// declaration changed while the pass runs leaves the manager invalid
    /// for the next pass.
    pub fn swap_valid(&self) -> bool {
        self.valid.swap(true, Ordering::AcqRel)
    }

    /// Register a font under a case-insensitive name.
    pub fn register_font(&mut self, name: &str, font: FontHandle) {
        tracing::debug!(target: targets::CASCADE, font = name, "registered font");
        self.fonts.insert(name.to_lowercase(), font);
    }

    pub fn font(&self, name: &str) -> Option<FontHandle> {
        self.fonts.get(&name.to_lowercase()).copied()
    }

    /// The font named by a computed style's `font-name`.
    pub fn font_for(&self, style: &Style) -> Option<FontHandle> {
        self.font(style.get_str(StringKey::FontName))
    }

    /// Registered fonts, in no particular order.
    pub fn fonts(&self) -> impl Iterator<Item = (&str, FontHandle)> {
        self.fonts.iter().map(|(name, font)| (name.as_str(), *font))
    }

    /// Register a skin factory under a case-insensitive name.
    pub fn register_skin<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Skin> + Send + Sync + 'static,
    {
        tracing::debug!(target: targets::CASCADE, skin = name, "registered skin");
        self.skins.insert(name.to_lowercase(), Arc::new(factory));
    }

    pub fn has_skin(&self, name: &str) -> bool {
        self.skins.contains_key(&name.to_lowercase())
    }

    /// Instantiate a registered skin.
    pub fn create_skin(&self, name: &str) -> Option<Box<dyn Skin>> {
        self.skins.get(&name.to_lowercase()).map(|factory| factory())
    }

    /// Instantiate the skin named by a computed style's `skin`.
    pub fn skin_for(&self, style: &Style) -> Option<Box<dyn Skin>> {
        self.create_skin(style.get_str(StringKey::Skin))
    }
}

impl Default for StyleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StyleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleManager")
            .field("config", &self.config)
            .field("declarations", &self.declaration_count())
            .field("fonts", &self.fonts.len())
            .field("skins", &self.skins.len())
            .field("valid", &self.is_valid())
            .finish()
    }
}
