// ── Scoped page-scroll lock ──
//
// Modals and the expanded bottom sheet suppress page scrolling for as long
// as they are open. Each holder owns a `ScrollGuard`; the page is locked
// while at least one guard is alive, and dropping the guard (close,
// navigation, teardown) releases it.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

/// Shared scroll-lock context for one page.
///
/// Cheap to clone; all clones refer to the same lock.
#[derive(Clone)]
pub struct ScrollLock {
    holders: Arc<watch::Sender<usize>>,
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScrollLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLock")
            .field("holders", &self.holders())
            .finish()
    }
}

impl ScrollLock {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            holders: Arc::new(tx),
        }
    }

    /// Take a hold on the lock until the returned guard is dropped.
    pub fn acquire(&self, owner: &'static str) -> ScrollGuard {
        self.holders.send_modify(|n| *n += 1);
        trace!(owner, holders = self.holders(), "scroll lock acquired");
        ScrollGuard {
            holders: Arc::clone(&self.holders),
            owner,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    pub fn holders(&self) -> usize {
        *self.holders.borrow()
    }

    /// Watch the holder count; the page is locked while it is non-zero.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.holders.subscribe()
    }
}

/// One hold on a [`ScrollLock`]. Released on drop.
#[must_use = "the scroll lock is released as soon as the guard is dropped"]
pub struct ScrollGuard {
    holders: Arc<watch::Sender<usize>>,
    owner: &'static str,
}

impl ScrollGuard {
    pub fn owner(&self) -> &'static str {
        self.owner
    }
}

impl std::fmt::Debug for ScrollGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollGuard")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.send_modify(|n| *n = n.saturating_sub(1));
        trace!(owner = self.owner, "scroll lock released");
    }
}
