//! Selector weight.
//!
//! A selector's weight is the sum over every link of the chain. Higher
//! weight wins in the cascade; equal weights keep declaration order.

use super::{PseudoStates, Selector};

/// Weight of an id constraint.
pub const ID_WEIGHT: u32 = 15;
/// Weight of a tag constraint. Universal links add nothing.
pub const TAG_WEIGHT: u32 = 10;
/// Weight of each class constraint.
pub const CLASS_WEIGHT: u32 = 10;

impl PseudoStates {
    /// Summed weight of the pseudo-states in the set.
    pub fn weight(self) -> u32 {
        self.iter()
            .map(|flag| match flag {
                Self::HOVER => 1,
                Self::FOCUS => 2,
                Self::ACTIVE => 3,
                Self::DISABLED => 4,
                _ => 1,
            })
            .sum()
    }
}

impl Selector {
    /// Weight of this link alone.
    pub fn link_weight(&self) -> u32 {
        let mut weight = self.pseudo.weight();
        if self.id.is_some() {
            weight += ID_WEIGHT;
        }
        if self.tag.is_some() {
            weight += TAG_WEIGHT;
        }
        weight + CLASS_WEIGHT * self.classes.len() as u32
    }

    /// Weight of the whole chain starting at this link.
    pub fn weight(&self) -> u32 {
        self.link_weight() + self.next.as_ref().map_or(0, |next| next.weight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(text: &str) -> u32 {
        Selector::parse(text).unwrap().weight()
    }

    #[test]
    fn basic_weights() {
        assert_eq!(weight("*"), 0);
        assert_eq!(weight("Button"), 10);
        assert_eq!(weight(".primary"), 10);
        assert_eq!(weight("#save"), 15);
        assert_eq!(weight("Button.primary:hover"), 21);
        assert_eq!(weight("Panel > Label"), 20);
        assert_eq!(weight(":disabled"), 4);
        assert_eq!(weight("Label:empty:first-child:last-child"), 13);
    }

    #[test]
    fn pseudo_weights() {
        assert_eq!(PseudoStates::HOVER.weight(), 1);
        assert_eq!(PseudoStates::FOCUS.weight(), 2);
        assert_eq!(PseudoStates::ACTIVE.weight(), 3);
        assert_eq!(PseudoStates::DISABLED.weight(), 4);
        assert_eq!((PseudoStates::HOVER | PseudoStates::ACTIVE).weight(), 4);
        assert_eq!(PseudoStates::empty().weight(), 0);
    }

    #[test]
    fn adding_constraints_increases_weight() {
        let base = ["Button", "Panel Label", ":hover", "*"];
        for text in base {
            let w = weight(text);
            assert!(weight(&format!("{text}#x")) > w, "{text}");
            assert!(weight(&format!("{text}.x")) > w, "{text}");
            assert!(weight(&format!("Window {text}")) > w, "{text}");
        }
    }
}
