//! A single style declaration.

use crate::selector::Selector;
use crate::style::{ChangeCallback, Style};

/// A selector paired with the values it declares.
///
/// Each declaration has:
/// - A parsed selector that decides which nodes it applies to
/// - A value store, mutated by the author after creation
/// - The selector weight, computed once
/// - A creation order for tie-breaking equal weights
///
/// When created with a change callback, every change to the store fires it.
/// The style manager uses this to drop its valid flag.
#[derive(Debug, Clone)]
pub struct Declaration {
    selector: Selector,
    style: Style,
    weight: u32,
    order: usize,
}

impl Declaration {
    /// Create an empty declaration.
    pub fn new(selector: Selector, order: usize, on_change: Option<ChangeCallback>) -> Self {
        let weight = selector.weight();
        let mut style = Style::new();
        if let Some(callback) = on_change {
            style.set_on_change(callback);
        }
        Self {
            selector,
            style,
            weight,
            order,
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Cached selector weight.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Creation order within the owning manager.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}
