//! Declared and computed property tables.
//!
//! [`Style`] is used for every table in the cascade: declaration bodies,
//! inline styles, per-kind defaults and the computed result handed back to a
//! node. [`InheritableValues`] lists which keys a node kind takes from its
//! parent.

mod inheritable;
mod store;

pub use inheritable::InheritableValues;
pub use store::{ChangeCallback, Style};
