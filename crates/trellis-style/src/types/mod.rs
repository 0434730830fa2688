//! Core value types for styling.

mod color;
mod keys;

pub use color::Color;
pub use keys::{
    BoolKey, ColorKey, FloatKey, IntKey, PropertyCategory, PropertyKey, StringKey,
    normalize_property_name,
};

/// Opaque handle of a font loaded by the rendering backend.
///
/// The style engine only stores and hands out handles by name; creating them
/// is the backend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);
