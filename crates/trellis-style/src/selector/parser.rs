//! Selector text parsing.
//!
//! Grammar, after lower-casing the whole text:
//!
//! ```text
//! selector := segment ( ws segment | ws? '>' ws? segment )*
//! segment  := tag? ( '#' id | '.' class | ':' pseudo )*
//! tag      := name | '*'
//! ```
//!
//! Parsing is lenient. Unknown pseudos are dropped, empty markers are
//! ignored and a `>` with nothing on its left does nothing. The only failure
//! is text that produces no segment at all.

use std::str::FromStr;

use trellis_core::logging::targets;

use super::{PseudoStates, Selector};
use crate::error::Error;

enum Token<'a> {
    Segment(&'a str),
    Child,
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let mut rest = word;
        while let Some(pos) = rest.find('>') {
            if pos > 0 {
                tokens.push(Token::Segment(&rest[..pos]));
            }
            tokens.push(Token::Child);
            rest = &rest[pos + 1..];
        }
        if !rest.is_empty() {
            tokens.push(Token::Segment(rest));
        }
    }
    tokens
}

#[derive(Clone, Copy)]
enum Part {
    Tag,
    Id,
    Class,
    Pseudo,
}

fn flush(link: &mut Selector, part: Part, buf: &str, source: &str) {
    if buf.is_empty() {
        return;
    }
    match part {
        Part::Tag if buf == "*" => {}
        Part::Tag => link.tag = Some(buf.to_string()),
        Part::Id => link.id = Some(buf.to_string()),
        Part::Class => {
            link.classes.insert(buf.to_string());
        }
        Part::Pseudo => match PseudoStates::from_pseudo_name(buf) {
            Some(flag) => link.pseudo |= flag,
            None => {
                tracing::debug!(target: targets::SELECTOR, pseudo = buf, selector = source, "ignoring unknown pseudo-state");
            }
        },
    }
}

fn parse_segment(segment: &str, source: &str) -> Selector {
    let mut link = Selector::default();
    let mut part = Part::Tag;
    let mut start = 0;
    for (pos, ch) in segment.char_indices() {
        let marker = match ch {
            '#' => Part::Id,
            '.' => Part::Class,
            ':' => Part::Pseudo,
            _ => continue,
        };
        flush(&mut link, part, &segment[start..pos], source);
        part = marker;
        start = pos + 1;
    }
    flush(&mut link, part, &segment[start..], source);
    link
}

impl Selector {
    /// Parse selector text.
    ///
    /// Returns the rightmost link, or `None` when the text contains no
    /// segment (empty, whitespace only, or a lone `>`).
    ///
    /// # Example
    ///
    /// ```
    /// use trellis_style::selector::{PseudoStates, Selector};
    ///
    /// let sel = Selector::parse("Button.primary:hover").unwrap();
    /// assert_eq!(sel.tag(), Some("button"));
    /// assert!(sel.classes().contains("primary"));
    /// assert_eq!(sel.pseudo(), PseudoStates::HOVER);
    /// assert!(sel.next().is_none());
    ///
    /// assert!(Selector::parse("   ").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Selector> {
        let lowered = text.to_lowercase();
        let mut current: Option<Selector> = None;

        for token in tokenize(&lowered) {
            match token {
                Token::Child => {
                    if let Some(link) = current.as_mut() {
                        link.direct_child = true;
                    }
                }
                Token::Segment(segment) => {
                    let mut link = parse_segment(segment, &lowered);
                    if let Some(prev) = current.take() {
                        link.depth = prev.depth + 1;
                        link.next = Some(Box::new(prev));
                    }
                    current = Some(link);
                }
            }
        }

        if current.is_none() {
            tracing::trace!(target: targets::SELECTOR, selector = text, "selector text produced no links");
        }
        current
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s).ok_or_else(|| Error::invalid_selector(s, "no selector segment"))
    }
}
