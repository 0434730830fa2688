//! Style manager configuration.

/// Configuration for a [`StyleManager`](super::StyleManager).
///
/// # Example
///
/// ```
/// use trellis_style::resolve::StyleManagerConfig;
///
/// let config = StyleManagerConfig::default()
///     .with_depth_fast_path(false)
///     .with_warn_on_invalid_selector(false);
/// assert!(!config.depth_fast_path);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleManagerConfig {
    /// Reject nodes shallower than a selector link before checking them.
    ///
    /// Never changes a match result, only skips work.
    pub depth_fast_path: bool,
    /// Log a warning when selector text cannot be parsed.
    pub warn_on_invalid_selector: bool,
    /// `debug_assert!` on unparseable selector text.
    pub assert_on_invalid_selector: bool,
}

impl Default for StyleManagerConfig {
    fn default() -> Self {
        Self {
            depth_fast_path: true,
            warn_on_invalid_selector: true,
            assert_on_invalid_selector: false,
        }
    }
}

impl StyleManagerConfig {
    pub fn with_depth_fast_path(mut self, enabled: bool) -> Self {
        self.depth_fast_path = enabled;
        self
    }

    pub fn with_warn_on_invalid_selector(mut self, enabled: bool) -> Self {
        self.warn_on_invalid_selector = enabled;
        self
    }

    pub fn with_assert_on_invalid_selector(mut self, enabled: bool) -> Self {
        self.assert_on_invalid_selector = enabled;
        self
    }
}
