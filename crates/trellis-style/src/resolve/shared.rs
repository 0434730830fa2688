//! Thread-shareable style manager handle.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::StyleManager;

/// A cloneable handle to a [`StyleManager`] behind a read-write lock.
///
/// Authoring code takes the write lock to create or edit declarations; the
/// frame pass holds the read lock while it computes styles. Clones share the
/// same manager.
#[derive(Debug, Clone, Default)]
pub struct SharedStyleManager {
    inner: Arc<RwLock<StyleManager>>,
}

impl SharedStyleManager {
    pub fn new(manager: StyleManager) -> Self {
        Self {
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    /// Lock for cascade passes and lookups.
    pub fn read(&self) -> RwLockReadGuard<'_, StyleManager> {
        self.inner.read()
    }

    /// Lock for authoring.
    pub fn write(&self) -> RwLockWriteGuard<'_, StyleManager> {
        self.inner.write()
    }

    /// Whether both handles refer to the same manager.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<StyleManager> for SharedStyleManager {
    fn from(manager: StyleManager) -> Self {
        Self::new(manager)
    }
}
