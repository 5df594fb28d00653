//! Checkpoint-bracketed batch execution.

use sfumato_arena::{Arena, Plane};

use crate::error::ResizeError;
use crate::resampler::{Resampler, ResizeGeometry, Tile, TilePair};

fn tile_fits(tile: Tile, width: usize, height: usize, plane: &Plane) -> bool {
    let x_ok = tile
        .x
        .checked_add(width)
        .is_some_and(|end| end <= plane.width());
    let y_ok = tile
        .y
        .checked_add(height)
        .is_some_and(|end| end <= plane.height());
    x_ok && y_ok
}

/// Resample every tile pair in `pairs` through one resampler.
///
/// The whole batch runs between `save()` and `restore()`, so whatever
/// transient memory the resampler takes from the arena is reclaimed when
/// the batch ends — on the error path too. The resampler's `begin` runs
/// once; `run` once per pair, in order.
///
/// Tile rectangles are validated against the plane before any work
/// happens; a batch never starts half-valid.
pub fn resize_batch<R: Resampler>(
    arena: &mut Arena,
    resampler: &mut R,
    plane: &Plane,
    geom: &ResizeGeometry,
    pairs: &[TilePair],
) -> Result<(), ResizeError> {
    if pairs.is_empty() {
        return Err(ResizeError::EmptyBatch);
    }
    for (index, pair) in pairs.iter().enumerate() {
        let src_ok = tile_fits(pair.src, geom.src_width, geom.src_height, plane);
        let dst_ok = tile_fits(pair.dst, geom.dst_width, geom.dst_height, plane);
        if !src_ok || !dst_ok {
            return Err(ResizeError::TileOutOfBounds { index });
        }
    }

    arena.try_save()?;
    let outcome = run_pairs(arena, resampler, plane, geom, pairs);
    // The checkpoint must be consumed on every path; only then surface
    // whatever the resampler said.
    let restored = arena.try_restore();
    outcome?;
    restored?;
    Ok(())
}

fn run_pairs<R: Resampler>(
    arena: &mut Arena,
    resampler: &mut R,
    plane: &Plane,
    geom: &ResizeGeometry,
    pairs: &[TilePair],
) -> Result<(), ResizeError> {
    resampler.begin(arena, geom, plane.stride())?;
    for pair in pairs {
        resampler.run(arena, plane.region(), *pair)?;
    }
    Ok(())
}
