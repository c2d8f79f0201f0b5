//! Cooperative reset/cancel signal shared between a run and its host.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable reset flag backed by an [`AtomicBool`].
///
/// The host sets it (possibly from inside a repaint callback); the search
/// observes it only at step boundaries. Requesting twice is the same as
/// requesting once.
#[derive(Clone, Debug, Default)]
pub struct ResetHandle {
    requested: Arc<AtomicBool>,
}

impl ResetHandle {
    /// Create a new, un-requested handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a reset.
    #[inline]
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    /// Whether a reset has been requested and not yet consumed.
    #[inline]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }

    /// Consume a pending request. Returns whether one was pending.
    #[inline]
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let a = ResetHandle::new();
        let b = a.clone();
        assert!(!b.is_requested());
        a.request();
        assert!(b.is_requested());
    }

    #[test]
    fn request_is_idempotent_and_take_consumes() {
        let h = ResetHandle::new();
        h.request();
        h.request();
        assert!(h.take());
        assert!(!h.is_requested());
        assert!(!h.take());
    }
}
