//! Backing stores that record growth traffic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sfumato_arena::{BackingStore, HeapStore, StoreError};

/// Shared handle onto a [`CountingStore`]'s growth counters.
///
/// The store itself moves into the arena; tests keep this handle.
#[derive(Clone, Debug, Default)]
pub struct GrowthLog {
    calls: Arc<AtomicUsize>,
    pages: Arc<AtomicUsize>,
}

impl GrowthLog {
    /// Number of non-query growth calls (`delta_pages > 0`).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Total pages requested across all growth calls.
    pub fn pages_requested(&self) -> usize {
        self.pages.load(Ordering::Relaxed)
    }
}

/// A [`HeapStore`] wrapper that counts growth requests.
pub struct CountingStore {
    inner: HeapStore,
    log: GrowthLog,
}

impl CountingStore {
    /// Create an unbounded counting store and its observation handle.
    pub fn new() -> (Self, GrowthLog) {
        Self::wrap(HeapStore::new())
    }

    /// Create a counting store with a page limit, for refusal tests.
    pub fn with_page_limit(pages: usize) -> (Self, GrowthLog) {
        Self::wrap(HeapStore::with_page_limit(pages))
    }

    fn wrap(inner: HeapStore) -> (Self, GrowthLog) {
        let log = GrowthLog::default();
        (
            Self {
                inner,
                log: log.clone(),
            },
            log,
        )
    }
}

impl BackingStore for CountingStore {
    fn grow(&mut self, delta_pages: usize) -> Result<usize, StoreError> {
        if delta_pages > 0 {
            self.log.calls.fetch_add(1, Ordering::Relaxed);
            self.log.pages.fetch_add(delta_pages, Ordering::Relaxed);
        }
        self.inner.grow(delta_pages)
    }

    fn words(&self) -> &[u64] {
        self.inner.words()
    }

    fn words_mut(&mut self) -> &mut [u64] {
        self.inner.words_mut()
    }
}
