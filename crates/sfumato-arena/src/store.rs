//! Page-granular backing stores.
//!
//! [`BackingStore`] is the seam to whatever owns the underlying address
//! space. The arena only ever asks it to grow by whole 64 KiB pages and
//! never hands memory back; committed contents survive growth.

use crate::error::StoreError;

/// Bytes per backing-store page.
pub const PAGE_SIZE: usize = 64 * 1024;

/// Largest supported allocation alignment, as a power-of-two exponent
/// (16 bytes).
pub const MAX_ALIGN_LOG2: u32 = 4;

/// 64-bit words per page.
pub(crate) const PAGE_WORDS: usize = PAGE_SIZE / 8;

/// Growable page-granular memory owned by the embedding environment.
///
/// The committed range is exposed as 64-bit words so that the base is
/// 8-byte aligned; the arena derives byte and `f32` views from it without
/// any `unsafe`. Implementations must never shrink the store, and growth
/// must preserve committed contents (reallocating to a new address is
/// fine — the arena addresses everything by offset).
pub trait BackingStore {
    /// Grow the committed range by `delta_pages` whole pages.
    ///
    /// Returns the new total committed size in bytes. Growing by zero
    /// pages is a size query. Refusal is an error, never a smaller grant.
    fn grow(&mut self, delta_pages: usize) -> Result<usize, StoreError>;

    /// The committed range as words.
    fn words(&self) -> &[u64];

    /// Mutable access to the committed range.
    fn words_mut(&mut self) -> &mut [u64];

    /// Committed size in bytes.
    fn committed(&self) -> usize {
        self.words().len() * 8
    }
}

/// Default in-process store over a `Vec<u64>`.
///
/// Starts empty and grows on demand. An optional page limit models an
/// embedding that refuses further address-space growth; without one the
/// store grows until the allocator itself gives out.
#[derive(Debug, Default)]
pub struct HeapStore {
    words: Vec<u64>,
    page_limit: Option<usize>,
}

impl HeapStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that refuses to commit more than `pages`.
    pub fn with_page_limit(pages: usize) -> Self {
        Self {
            words: Vec::new(),
            page_limit: Some(pages),
        }
    }

    /// Pages currently committed.
    pub fn page_count(&self) -> usize {
        self.words.len() / PAGE_WORDS
    }
}

impl BackingStore for HeapStore {
    fn grow(&mut self, delta_pages: usize) -> Result<usize, StoreError> {
        let committed_pages = self.page_count();
        let requested_pages = committed_pages
            .checked_add(delta_pages)
            .ok_or(StoreError::Refused {
                requested_pages: usize::MAX,
                committed_pages,
            })?;
        if let Some(limit) = self.page_limit {
            if requested_pages > limit {
                return Err(StoreError::Refused {
                    requested_pages,
                    committed_pages,
                });
            }
        }
        self.words.resize(requested_pages * PAGE_WORDS, 0);
        Ok(self.words.len() * 8)
    }

    fn words(&self) -> &[u64] {
        &self.words
    }

    fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_commits_whole_pages() {
        let mut store = HeapStore::new();
        assert_eq!(store.committed(), 0);
        assert_eq!(store.grow(1).unwrap(), PAGE_SIZE);
        assert_eq!(store.grow(2).unwrap(), 3 * PAGE_SIZE);
        assert_eq!(store.page_count(), 3);
    }

    #[test]
    fn zero_growth_is_a_size_query() {
        let mut store = HeapStore::new();
        assert_eq!(store.grow(0).unwrap(), 0);
        store.grow(2).unwrap();
        assert_eq!(store.grow(0).unwrap(), 2 * PAGE_SIZE);
    }

    #[test]
    fn page_limit_refuses_growth() {
        let mut store = HeapStore::with_page_limit(2);
        store.grow(2).unwrap();
        let err = store.grow(1).unwrap_err();
        assert_eq!(
            err,
            StoreError::Refused {
                requested_pages: 3,
                committed_pages: 2
            }
        );
        // Refusal must not change the committed size.
        assert_eq!(store.committed(), 2 * PAGE_SIZE);
    }

    #[test]
    fn growth_preserves_contents() {
        let mut store = HeapStore::new();
        store.grow(1).unwrap();
        store.words_mut()[0] = 0xDEAD_BEEF;
        store.grow(4).unwrap();
        assert_eq!(store.words()[0], 0xDEAD_BEEF);
    }
}
