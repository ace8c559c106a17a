//! State that outlives a single engine.
//!
//! Loading decodes every clip and image, which is the slow part of start-up.
//! [`TimelineEngine::dispose`](crate::engine::TimelineEngine::dispose) hands
//! the loaded registry back in a [`SessionContext`] so the next engine (for
//! example after the window surface is recreated) skips loading entirely.

use std::sync::Arc;

use crate::assets::AssetRegistry;

/// Explicit carrier for cross-engine state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    registry: Option<Arc<AssetRegistry>>,
}

impl SessionContext {
    /// A fresh session with nothing loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Session that already holds a loaded registry.
    #[must_use]
    pub fn with_registry(registry: Arc<AssetRegistry>) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// The registry from an earlier engine, if any.
    #[must_use]
    pub fn registry(&self) -> Option<&Arc<AssetRegistry>> {
        self.registry.as_ref()
    }

    /// Whether an engine built from this context can skip loading.
    #[must_use]
    pub fn is_warm(&self) -> bool {
        self.registry.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MediaSurface;

    #[test]
    fn fresh_session_is_cold() {
        let session = SessionContext::new();
        assert!(!session.is_warm());
        assert!(session.registry().is_none());
    }

    #[test]
    fn handoff_shares_the_same_registry() {
        let mut registry = AssetRegistry::new();
        registry.insert_texture("a".into(), MediaSurface::solid(2, 2, [0; 4]));
        let registry = Arc::new(registry);

        let session = SessionContext::with_registry(Arc::clone(&registry));
        let next = session.clone();
        assert!(next.is_warm());
        let handed = next.registry().map(Arc::clone);
        assert!(handed.is_some_and(|r| Arc::ptr_eq(&r, &registry)));
        assert_eq!(Arc::strong_count(&registry), 3);
    }
}
