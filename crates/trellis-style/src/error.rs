//! Error types for the styling system.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the fallible style entry points.
///
/// The cascade itself never fails; these come from the `try_*` and parsing
/// helpers that let callers detect input the lenient paths would ignore.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Selector text that produces no selector link.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A property name that matches no key of the requested category.
    #[error("Unknown {category} property '{name}'")]
    UnknownProperty { category: &'static str, name: String },

    /// Color text that is neither `#RRGGBB` nor `#AARRGGBB`.
    #[error("Invalid color '{0}'")]
    InvalidColor(String),
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create an unknown-property error.
    pub fn unknown_property(category: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownProperty {
            category,
            name: name.into(),
        }
    }
}
