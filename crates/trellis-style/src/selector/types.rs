//! Selector type definitions.

use std::collections::BTreeSet;
use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Pseudo-state constraints of a selector link (`:hover`, `:empty`, ...).
    ///
    /// Every flag in the set must hold for the link to match.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PseudoStates: u8 {
        /// `:hover`
        const HOVER       = 0b0000_0001;
        /// `:focus`
        const FOCUS       = 0b0000_0010;
        /// `:active`
        const ACTIVE      = 0b0000_0100;
        /// `:disabled`
        const DISABLED    = 0b0000_1000;
        /// `:empty`, the node has no children.
        const EMPTY       = 0b0001_0000;
        /// `:first-child`
        const FIRST_CHILD = 0b0010_0000;
        /// `:last-child`
        const LAST_CHILD  = 0b0100_0000;
    }
}

impl PseudoStates {
    /// Parse one lower-case pseudo name. `firstchild` and `lastchild` are
    /// accepted as aliases.
    pub fn from_pseudo_name(name: &str) -> Option<Self> {
        match name {
            "hover" => Some(Self::HOVER),
            "focus" => Some(Self::FOCUS),
            "active" => Some(Self::ACTIVE),
            "disabled" => Some(Self::DISABLED),
            "empty" => Some(Self::EMPTY),
            "first-child" | "firstchild" => Some(Self::FIRST_CHILD),
            "last-child" | "lastchild" => Some(Self::LAST_CHILD),
            _ => None,
        }
    }

    /// Canonical name of a single flag.
    pub fn name(self) -> &'static str {
        match self {
            Self::HOVER => "hover",
            Self::FOCUS => "focus",
            Self::ACTIVE => "active",
            Self::DISABLED => "disabled",
            Self::EMPTY => "empty",
            Self::FIRST_CHILD => "first-child",
            Self::LAST_CHILD => "last-child",
            _ => "",
        }
    }
}

/// One link of a selector chain, and through `next` the whole chain.
///
/// The value returned by [`Selector::parse`] is the rightmost (subject)
/// link. Each link's `next` points to the link on its left, toward the
/// ancestors. `"Panel > Label:hover"` is a `label` link with the `HOVER`
/// state whose `next` is a direct-child `panel` link.
///
/// Selectors are immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selector {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: BTreeSet<String>,
    pub(crate) pseudo: PseudoStates,
    pub(crate) direct_child: bool,
    pub(crate) next: Option<Box<Selector>>,
    pub(crate) depth: usize,
}

impl Selector {
    /// Required tag, `None` for universal links.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Required id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Required classes.
    pub fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    /// Required pseudo-states.
    pub fn pseudo(&self) -> PseudoStates {
        self.pseudo
    }

    /// Whether this link must match the immediate parent of the node matched
    /// by the link to its right.
    pub fn is_direct_child(&self) -> bool {
        self.direct_child
    }

    /// The link to the left, toward the ancestors.
    pub fn next(&self) -> Option<&Selector> {
        self.next.as_deref()
    }

    /// Number of links to the left of this one.
    ///
    /// A node shallower than this cannot match.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of links in the chain starting here.
    pub fn len(&self) -> usize {
        self.depth + 1
    }

    /// Whether this link constrains nothing on its own.
    pub fn is_universal(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.pseudo.is_empty()
    }

    fn fmt_link(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => f.write_str(tag)?,
            None if self.is_universal() => f.write_str("*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for flag in self.pseudo.iter() {
            write!(f, ":{}", flag.name())?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(next) = &self.next {
            write!(f, "{next}")?;
            f.write_str(if next.direct_child { " > " } else { " " })?;
        }
        self.fmt_link(f)
    }
}
