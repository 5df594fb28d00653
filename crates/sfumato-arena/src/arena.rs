//! Bump allocation with page-granular growth and one checkpoint level.

use std::fmt;

use crate::error::ArenaError;
use crate::region::Region;
use crate::store::{BackingStore, HeapStore, MAX_ALIGN_LOG2, PAGE_SIZE};

/// Round `x` up to a multiple of `1 << align_log2`.
fn align_up(x: usize, align_log2: u32) -> Option<usize> {
    let mask = (1usize << align_log2) - 1;
    x.checked_add(mask).map(|v| v & !mask)
}

/// Monotonically growing linear allocator with a single checkpoint.
///
/// `alloc` carves aligned [`Region`]s from a page-granular backing store,
/// growing it on demand; nothing is ever freed individually. [`reset`]
/// discards everything at once, and one [`save`]/[`restore`] pair rewinds
/// the cursor across a transient scope (a resize batch, typically).
///
/// Allocations are **not** zero-initialized: after a discarding `reset()`
/// or `restore()`, reissued regions expose whatever bytes were last
/// written there.
///
/// [`reset`]: Arena::reset
/// [`save`]: Arena::save
/// [`restore`]: Arena::restore
pub struct Arena {
    store: Box<dyn BackingStore>,
    bytes_allocated: usize,
    checkpoint: Option<usize>,
}

impl Arena {
    /// Create an arena over a fresh unbounded [`HeapStore`].
    pub fn new() -> Self {
        Self::with_store(Box::new(HeapStore::new()))
    }

    /// Create an arena over a caller-provided backing store.
    pub fn with_store(store: Box<dyn BackingStore>) -> Self {
        Self {
            store,
            bytes_allocated: 0,
            checkpoint: None,
        }
    }

    // ── Allocation ───────────────────────────────────────────────────

    /// Allocate `count << align_log2` bytes aligned to `1 << align_log2`.
    ///
    /// The alignment doubles as the element size, so `alloc(2, n)` is an
    /// allocation of `n` f32-sized slots. Zero-length allocations are
    /// legal and return an empty region at the aligned cursor.
    ///
    /// Grows the backing store by whole pages when the committed range is
    /// too small, rounding the deficit up to a page multiple.
    pub fn try_alloc(&mut self, align_log2: u32, count: usize) -> Result<Region, ArenaError> {
        if align_log2 > MAX_ALIGN_LOG2 {
            return Err(ArenaError::AlignmentTooLarge { align_log2 });
        }
        let bytes = count
            .checked_mul(1usize << align_log2)
            .ok_or(ArenaError::SizeOverflow)?;
        let base = align_up(self.bytes_allocated, align_log2).ok_or(ArenaError::SizeOverflow)?;
        let end = base.checked_add(bytes).ok_or(ArenaError::SizeOverflow)?;
        if end > self.store.committed() {
            let deficit = end - self.store.committed();
            let delta_pages = deficit.div_ceil(PAGE_SIZE);
            let new_total = self.store.grow(delta_pages)?;
            assert!(
                end <= new_total,
                "backing store grew to {new_total} bytes, needed {end}"
            );
        }
        self.bytes_allocated = end;
        Ok(Region::new(base, bytes))
    }

    /// Panicking twin of [`try_alloc`](Arena::try_alloc).
    ///
    /// # Panics
    ///
    /// Panics if the alignment is out of range, a size computation
    /// overflows, or the backing store refuses to grow.
    pub fn alloc(&mut self, align_log2: u32, count: usize) -> Region {
        match self.try_alloc(align_log2, count) {
            Ok(region) => region,
            Err(e) => panic!("arena allocation failed: {e}"),
        }
    }

    /// Allocate `count` bytes, unaligned.
    pub fn alloc_u8(&mut self, count: usize) -> Region {
        self.alloc(0, count)
    }

    /// Checked twin of [`alloc_u8`](Arena::alloc_u8).
    pub fn try_alloc_u8(&mut self, count: usize) -> Result<Region, ArenaError> {
        self.try_alloc(0, count)
    }

    /// Allocate `count` f32 slots, 4-byte aligned.
    pub fn alloc_f32(&mut self, count: usize) -> Region {
        self.alloc(2, count)
    }

    /// Checked twin of [`alloc_f32`](Arena::alloc_f32).
    pub fn try_alloc_f32(&mut self, count: usize) -> Result<Region, ArenaError> {
        self.try_alloc(2, count)
    }

    // ── Wholesale reclaim ────────────────────────────────────────────

    /// Discard every allocation; committed pages are kept for reuse.
    ///
    /// Forbidden while a checkpoint is active — a reset that silently
    /// dropped a pending `restore()` would turn a caller bug into data
    /// corruption at a distance.
    pub fn try_reset(&mut self) -> Result<(), ArenaError> {
        if self.checkpoint.is_some() {
            return Err(ArenaError::CheckpointActive);
        }
        self.bytes_allocated = 0;
        Ok(())
    }

    /// Panicking twin of [`try_reset`](Arena::try_reset).
    ///
    /// # Panics
    ///
    /// Panics if a checkpoint is active.
    pub fn reset(&mut self) {
        if let Err(e) = self.try_reset() {
            panic!("arena reset refused: {e}");
        }
    }

    /// Record the current cursor as the one checkpoint.
    ///
    /// Only one level of checkpoint exists; saving twice without an
    /// intervening [`restore`](Arena::restore) is a caller bug.
    pub fn try_save(&mut self) -> Result<(), ArenaError> {
        if self.checkpoint.is_some() {
            return Err(ArenaError::CheckpointActive);
        }
        self.checkpoint = Some(self.bytes_allocated);
        Ok(())
    }

    /// Panicking twin of [`try_save`](Arena::try_save).
    ///
    /// # Panics
    ///
    /// Panics if a checkpoint is already active.
    pub fn save(&mut self) {
        if let Err(e) = self.try_save() {
            panic!("arena save refused: {e}");
        }
    }

    /// Rewind the cursor to the checkpoint and clear it, discarding
    /// everything allocated since [`save`](Arena::save).
    pub fn try_restore(&mut self) -> Result<(), ArenaError> {
        match self.checkpoint.take() {
            Some(saved) => {
                self.bytes_allocated = saved;
                Ok(())
            }
            None => Err(ArenaError::NoCheckpoint),
        }
    }

    /// Panicking twin of [`try_restore`](Arena::try_restore).
    ///
    /// # Panics
    ///
    /// Panics if no checkpoint is active.
    pub fn restore(&mut self) {
        if let Err(e) = self.try_restore() {
            panic!("arena restore refused: {e}");
        }
    }

    // ── Introspection ────────────────────────────────────────────────

    /// Bytes allocated since the last discarding reset/restore.
    pub fn used(&self) -> usize {
        self.bytes_allocated
    }

    /// Committed backing-store size in bytes.
    pub fn committed(&self) -> usize {
        self.store.committed()
    }

    /// Committed backing-store size in whole pages.
    pub fn page_count(&self) -> usize {
        self.store.committed() / PAGE_SIZE
    }

    /// Whether a checkpoint is active.
    pub fn is_saved(&self) -> bool {
        self.checkpoint.is_some()
    }

    // ── Region resolution ────────────────────────────────────────────

    /// The region's bytes.
    ///
    /// # Panics
    ///
    /// Panics if the region extends past the committed range (a stale or
    /// foreign region — caller bug).
    pub fn bytes(&self, region: Region) -> &[u8] {
        let bytes: &[u8] = bytemuck::cast_slice(self.store.words());
        &bytes[region.offset()..region.end()]
    }

    /// The region's bytes, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the region extends past the committed range.
    pub fn bytes_mut(&mut self, region: Region) -> &mut [u8] {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(self.store.words_mut());
        &mut bytes[region.offset()..region.end()]
    }

    /// The region as f32 slots.
    ///
    /// # Panics
    ///
    /// Panics if the region is not 4-byte aligned (offset and length) or
    /// extends past the committed range.
    pub fn floats(&self, region: Region) -> &[f32] {
        check_float_region(region);
        bytemuck::cast_slice(self.bytes(region))
    }

    /// The region as f32 slots, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the region is not 4-byte aligned (offset and length) or
    /// extends past the committed range.
    pub fn floats_mut(&mut self, region: Region) -> &mut [f32] {
        check_float_region(region);
        bytemuck::cast_slice_mut(self.bytes_mut(region))
    }

    /// Two non-overlapping regions as mutable byte slices.
    ///
    /// This is how a caller reads one region while writing another (a
    /// resampler copying a source tile into transient scratch, say).
    ///
    /// # Panics
    ///
    /// Panics if the regions overlap or extend past the committed range.
    pub fn disjoint_mut(&mut self, a: Region, b: Region) -> (&mut [u8], &mut [u8]) {
        let (lo, hi, swapped) = if a.end() <= b.offset() {
            (a, b, false)
        } else {
            assert!(
                b.end() <= a.offset(),
                "regions overlap: {a:?} and {b:?}"
            );
            (b, a, true)
        };
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(self.store.words_mut());
        let (head, tail) = bytes.split_at_mut(hi.offset());
        let first = &mut head[lo.offset()..lo.end()];
        let second = &mut tail[..hi.len()];
        if swapped {
            (second, first)
        } else {
            (first, second)
        }
    }

    /// A shared f32 view of one region alongside a mutable f32 view of
    /// another (kernel weights read while the scratch plane is written).
    ///
    /// # Panics
    ///
    /// Panics if the regions overlap, are not 4-byte aligned, or extend
    /// past the committed range.
    pub fn floats_pair_mut(&mut self, shared: Region, excl: Region) -> (&[f32], &mut [f32]) {
        check_float_region(shared);
        check_float_region(excl);
        let (a, b) = self.disjoint_mut(shared, excl);
        (bytemuck::cast_slice(a), bytemuck::cast_slice_mut(b))
    }
}

fn check_float_region(region: Region) {
    assert!(
        region.offset() % 4 == 0 && region.len() % 4 == 0,
        "region {region:?} is not 4-byte aligned"
    );
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("used", &self.bytes_allocated)
            .field("committed", &self.store.committed())
            .field("checkpoint", &self.checkpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_allocation_commits_one_page() {
        let mut arena = Arena::new();
        let region = arena.alloc_u8(1);
        assert_eq!(region.offset(), 0);
        assert_eq!(arena.used(), 1);
        assert_eq!(arena.committed(), PAGE_SIZE);
    }

    #[test]
    fn growth_rounds_deficit_up_to_pages() {
        let mut arena = Arena::new();
        arena.alloc_u8(PAGE_SIZE + 1);
        assert_eq!(arena.page_count(), 2);
        // Fits in the committed tail, no further growth.
        arena.alloc_u8(PAGE_SIZE - 1);
        assert_eq!(arena.page_count(), 2);
    }

    #[test]
    fn alignment_rounds_the_cursor() {
        let mut arena = Arena::new();
        arena.alloc_u8(3);
        let region = arena.alloc(4, 1);
        assert_eq!(region.offset(), 16);
        assert_eq!(region.len(), 16);
        let next = arena.alloc(2, 2);
        assert_eq!(next.offset(), 32);
        assert_eq!(next.len(), 8, "alloc(2, n) is n f32-sized slots");
    }

    #[test]
    fn alignment_beyond_max_is_refused() {
        let mut arena = Arena::new();
        assert_eq!(
            arena.try_alloc(5, 1),
            Err(ArenaError::AlignmentTooLarge { align_log2: 5 })
        );
    }

    #[test]
    fn zero_length_allocation_is_legal() {
        let mut arena = Arena::new();
        let region = arena.alloc_u8(0);
        assert!(region.is_empty());
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn reset_is_idempotent_and_rewinds_to_base() {
        let mut arena = Arena::new();
        let first = arena.alloc_u8(100);
        arena.reset();
        arena.reset();
        assert_eq!(arena.used(), 0);
        let again = arena.alloc_u8(100);
        assert_eq!(again.offset(), first.offset());
        // Committed pages survive the reset.
        assert_eq!(arena.committed(), PAGE_SIZE);
    }

    #[test]
    fn save_restore_round_trip() {
        let mut arena = Arena::new();
        arena.alloc_u8(40);
        let before = arena.used();
        arena.save();
        arena.alloc_u8(5000);
        arena.alloc_f32(128);
        arena.restore();
        assert_eq!(arena.used(), before);
        assert!(!arena.is_saved());
    }

    #[test]
    #[should_panic(expected = "checkpoint is already active")]
    fn double_save_panics() {
        let mut arena = Arena::new();
        arena.save();
        arena.save();
    }

    #[test]
    #[should_panic(expected = "no active checkpoint")]
    fn restore_without_save_panics() {
        let mut arena = Arena::new();
        arena.restore();
    }

    #[test]
    #[should_panic(expected = "checkpoint is already active")]
    fn reset_under_checkpoint_panics() {
        let mut arena = Arena::new();
        arena.save();
        arena.reset();
    }

    #[test]
    fn growth_refusal_is_fatal_on_the_panicking_path() {
        let mut arena = Arena::with_store(Box::new(HeapStore::with_page_limit(1)));
        arena.alloc_u8(PAGE_SIZE);
        let err = arena.try_alloc_u8(1).unwrap_err();
        assert_eq!(
            err,
            ArenaError::GrowthRefused {
                requested_pages: 2,
                committed_pages: 1
            }
        );
        // The failed allocation must not move the cursor.
        assert_eq!(arena.used(), PAGE_SIZE);
    }

    #[test]
    #[should_panic(expected = "refused growth")]
    fn refused_growth_panics_via_alloc() {
        let mut arena = Arena::with_store(Box::new(HeapStore::with_page_limit(0)));
        arena.alloc_u8(1);
    }

    #[test]
    fn regions_resolve_to_distinct_bytes() {
        let mut arena = Arena::new();
        let a = arena.alloc_u8(4);
        let b = arena.alloc_u8(4);
        arena.bytes_mut(a).fill(1);
        arena.bytes_mut(b).fill(2);
        assert_eq!(arena.bytes(a), &[1, 1, 1, 1]);
        assert_eq!(arena.bytes(b), &[2, 2, 2, 2]);
    }

    #[test]
    fn float_regions_roundtrip() {
        let mut arena = Arena::new();
        let region = arena.alloc_f32(3);
        {
            let floats = arena.floats_mut(region);
            floats.copy_from_slice(&[0.25, 0.5, 0.25]);
        }
        assert_eq!(arena.floats(region), &[0.25, 0.5, 0.25]);
    }

    #[test]
    fn floats_pair_reads_and_writes_disjoint_regions() {
        let mut arena = Arena::new();
        let kernel = arena.alloc_f32(3);
        let scratch = arena.alloc_f32(8);
        arena.floats_mut(kernel).copy_from_slice(&[1.0, 2.0, 3.0]);
        let (shared, excl) = arena.floats_pair_mut(kernel, scratch);
        assert_eq!(shared, &[1.0, 2.0, 3.0]);
        excl.fill(7.0);
        assert_eq!(arena.floats(scratch), &[7.0; 8]);
    }

    #[test]
    fn disjoint_mut_accepts_either_order() {
        let mut arena = Arena::new();
        let a = arena.alloc_u8(8);
        let b = arena.alloc_u8(8);
        let (xa, xb) = arena.disjoint_mut(b, a);
        xa.fill(5);
        xb.fill(6);
        assert_eq!(arena.bytes(b), &[5; 8]);
        assert_eq!(arena.bytes(a), &[6; 8]);
    }

    #[test]
    #[should_panic(expected = "overlap")]
    fn overlapping_disjoint_mut_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc_u8(8);
        let inner = Region::new(a.offset() + 4, 8);
        arena.alloc_u8(8);
        arena.disjoint_mut(a, inner);
    }

    #[test]
    fn restored_cursor_reissues_the_same_offsets() {
        let mut arena = Arena::new();
        arena.alloc_u8(10);
        arena.save();
        let transient = arena.alloc_u8(100);
        arena.restore();
        arena.save();
        let reissued = arena.alloc_u8(100);
        arena.restore();
        assert_eq!(reissued.offset(), transient.offset());
    }
}
