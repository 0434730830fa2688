//! Selector types, parsing, matching and weight.

mod matcher;
mod parser;
mod types;
mod weight;

pub use matcher::SelectorMatcher;
pub use types::{PseudoStates, Selector};
pub use weight::{CLASS_WEIGHT, ID_WEIGHT, TAG_WEIGHT};
