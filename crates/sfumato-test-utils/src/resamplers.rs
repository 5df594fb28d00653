//! Minimal resamplers for exercising the batch orchestrator.

use std::sync::atomic::{AtomicUsize, Ordering};

use sfumato_arena::{Arena, Region};
use sfumato_resize::{Resampler, ResizeError, ResizeGeometry, TilePair};

/// Nearest-neighbor resampler with arena-allocated working memory.
///
/// Each `run` copies the source tile into a transient arena allocation,
/// then point-samples it into the destination — deliberately the simplest
/// thing that both resamples and leans on the checkpoint bracket for its
/// scratch. It stands in for a real resampling library in tests; it is
/// not one.
#[derive(Debug, Default)]
pub struct NearestResampler {
    state: Option<(ResizeGeometry, usize)>,
}

impl NearestResampler {
    /// Create a resampler with no batch state yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Resampler for NearestResampler {
    fn begin(
        &mut self,
        _arena: &mut Arena,
        geom: &ResizeGeometry,
        stride: usize,
    ) -> Result<(), ResizeError> {
        if geom.src_width == 0 || geom.src_height == 0 || geom.dst_width == 0 || geom.dst_height == 0
        {
            return Err(ResizeError::ResamplerFailed {
                reason: "degenerate geometry".into(),
            });
        }
        self.state = Some((*geom, stride));
        Ok(())
    }

    fn run(&mut self, arena: &mut Arena, plane: Region, pair: TilePair) -> Result<(), ResizeError> {
        let (geom, stride) = self.state.ok_or_else(|| ResizeError::ResamplerFailed {
            reason: "run before begin".into(),
        })?;

        // Transient source copy; reclaimed by the batch checkpoint.
        let copy = arena.try_alloc_u8(geom.src_width * geom.src_height)?;
        {
            let (src, tmp) = arena.disjoint_mut(plane, copy);
            for y in 0..geom.src_height {
                let from = (pair.src.y + y) * stride + pair.src.x;
                let to = y * geom.src_width;
                tmp[to..to + geom.src_width]
                    .copy_from_slice(&src[from..from + geom.src_width]);
            }
        }

        let (tmp, dst) = arena.disjoint_mut(copy, plane);
        for dy in 0..geom.dst_height {
            let sy = dy * geom.src_height / geom.dst_height;
            for dx in 0..geom.dst_width {
                let sx = dx * geom.src_width / geom.dst_width;
                dst[(pair.dst.y + dy) * stride + pair.dst.x + dx] =
                    tmp[sy * geom.src_width + sx];
            }
        }
        Ok(())
    }
}

/// Succeeds a configurable number of `run` calls, then fails.
///
/// Allocates a little transient memory on every call so that the
/// orchestrator's restore-on-error behavior is observable. The counter is
/// atomic so the resampler can be inspected after the batch returns.
#[derive(Debug)]
pub struct FailingResampler {
    succeed_count: usize,
    calls: AtomicUsize,
}

impl FailingResampler {
    /// Create a resampler that succeeds `succeed_count` times then fails.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `run` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Resampler for FailingResampler {
    fn begin(
        &mut self,
        _arena: &mut Arena,
        _geom: &ResizeGeometry,
        _stride: usize,
    ) -> Result<(), ResizeError> {
        Ok(())
    }

    fn run(
        &mut self,
        arena: &mut Arena,
        _plane: Region,
        _pair: TilePair,
    ) -> Result<(), ResizeError> {
        arena.try_alloc_u8(4096)?;
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ResizeError::ResamplerFailed {
                reason: format!("deliberate failure after {} successful runs", self.succeed_count),
            });
        }
        Ok(())
    }
}
