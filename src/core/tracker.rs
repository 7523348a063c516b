// webpify/src/core/tracker.rs
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Counts outstanding walks and conversions so the caller can block until
/// all spawned work is done.
///
/// Every `register` hands out a [`WorkGuard`]; the count drops by one when
/// that guard is dropped, on success, error or unwind alike.
#[derive(Clone, Default)]
pub struct WorkTracker {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    outstanding: Mutex<usize>,
    idle: Condvar,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, usize> {
        // The counter stays consistent even if a holder panicked.
        self.outstanding.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WorkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call before spawning the unit of work; move the guard into it.
    pub fn register(&self) -> WorkGuard {
        *self.inner.lock() += 1;
        WorkGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn outstanding(&self) -> usize {
        *self.inner.lock()
    }

    /// Blocks until every issued guard has been dropped.
    pub fn wait(&self) {
        let mut count = self.inner.lock();
        while *count > 0 {
            count = self
                .inner
                .idle
                .wait(count)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

#[must_use = "dropping the guard immediately marks the work as finished"]
pub struct WorkGuard {
    inner: Arc<Inner>,
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        let mut count = self.inner.lock();
        *count -= 1;
        if *count == 0 {
            self.inner.idle.notify_all();
        }
    }
}
