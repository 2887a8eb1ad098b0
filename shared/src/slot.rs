//! Single-slot, latest-wins mailbox between the network thread and the frame loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Holds at most one unread value. Each write replaces whatever is pending.
#[derive(Debug)]
pub struct LatestSlot<T> {
    pending: Mutex<Option<T>>,
    published: AtomicU64,
    overwritten: AtomicU64,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            pending: Mutex::new(None),
            published: AtomicU64::new(0),
            overwritten: AtomicU64::new(0),
        }
    }
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, discarding any unread one. Returns `true` if something was discarded.
    pub fn publish(&self, value: T) -> bool {
        let replaced = self.lock().replace(value).is_some();
        self.published.fetch_add(1, Ordering::Relaxed);
        if replaced {
            self.overwritten.fetch_add(1, Ordering::Relaxed);
        }
        replaced
    }

    /// Take the pending value, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn has_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Total values written.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Values replaced before anyone read them.
    pub fn overwritten(&self) -> u64 {
        self.overwritten.load(Ordering::Relaxed)
    }

    // An `Option<T>` can't be left half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
