//! The separable convolution engine.

use sfumato_arena::{Arena, Plane, Region};
use sfumato_core::sample::{to_byte, to_norm};
use sfumato_core::PixelsMut;

use crate::error::ConvolveError;
use crate::kernel::Taps;

/// Fixed-radius separable convolver with arena-resident state.
///
/// Construction allocates the kernel (`2R+1` weights) and a scratch plane
/// (`max_width * max_height` floats) from the arena once; both persist
/// until the arena is reset. Fill the weights through
/// [`weights_mut`](Convolver::weights_mut) before the first execute —
/// normalization is the caller's business and is not enforced.
///
/// A convolver whose allocations have been discarded by `arena.reset()`
/// must not be used again; like any stale region use, that is a caller
/// bug.
#[derive(Debug)]
pub struct Convolver {
    radius: usize,
    max_width: usize,
    max_height: usize,
    kernel: Region,
    scratch: Region,
}

impl Convolver {
    /// Set up a convolver for `radius` and the given maximum image size.
    ///
    /// `radius` must be at least 1. The scratch plane is sized for the
    /// worst case up front so that `execute` never allocates.
    pub fn new(
        arena: &mut Arena,
        radius: usize,
        max_width: usize,
        max_height: usize,
    ) -> Result<Self, ConvolveError> {
        if radius < 1 {
            return Err(ConvolveError::RadiusTooSmall { radius });
        }
        let taps = 2 * radius + 1;
        let kernel = arena.try_alloc_f32(taps)?;
        let pixels = max_width
            .checked_mul(max_height)
            .ok_or(ConvolveError::Arena(
                sfumato_arena::ArenaError::SizeOverflow,
            ))?;
        let scratch = arena.try_alloc_f32(pixels)?;
        Ok(Self {
            radius,
            max_width,
            max_height,
            kernel,
            scratch,
        })
    }

    /// Kernel radius fixed at setup.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Maximum image width fixed at setup.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Maximum image height fixed at setup.
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// The kernel weights (length `2*radius + 1`, center at `radius`).
    pub fn weights<'a>(&self, arena: &'a Arena) -> &'a [f32] {
        arena.floats(self.kernel)
    }

    /// Mutable kernel weights, for the caller to fill.
    pub fn weights_mut<'a>(&self, arena: &'a mut Arena) -> &'a mut [f32] {
        arena.floats_mut(self.kernel)
    }

    /// Blur `image` in place.
    ///
    /// The image buffer is external to the arena (the borrow checker
    /// enforces this — both are held mutably across the call). For
    /// bitmaps living inside the arena use
    /// [`execute_plane`](Convolver::execute_plane).
    ///
    /// The caller guarantees the image is zero within `radius` pixels of
    /// every edge; the engine does not verify this, it only relies on it
    /// for visual correctness. No bytes outside the view are read or
    /// written either way.
    ///
    /// # Panics
    ///
    /// Panics if the image exceeds the maximum size or is shorter than
    /// the kernel span.
    pub fn execute(&self, arena: &mut Arena, image: PixelsMut<'_>) {
        if let Err(e) = self.try_execute(arena, image) {
            panic!("convolution precondition violated: {e}");
        }
    }

    /// Checked twin of [`execute`](Convolver::execute).
    pub fn try_execute(
        &self,
        arena: &mut Arena,
        mut image: PixelsMut<'_>,
    ) -> Result<(), ConvolveError> {
        self.check_dims(image.width(), image.height())?;
        let (kernel, scratch) = arena.floats_pair_mut(self.kernel, self.scratch);
        convolve(kernel, self.radius, scratch, &mut image);
        Ok(())
    }

    /// Blur a tile of an arena-resident [`Plane`] in place.
    ///
    /// This is the path atlas pipelines take: the plane and the engine's
    /// scratch share one arena, so the engine splits the two regions
    /// itself and copies the taps out (a handful of floats on the stack)
    /// for the duration of the call.
    ///
    /// # Panics
    ///
    /// Panics on the same preconditions as [`execute`](Convolver::execute),
    /// or if the tile rectangle does not fit the plane.
    pub fn execute_plane(
        &self,
        arena: &mut Arena,
        plane: &Plane,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) {
        if let Err(e) = self.try_execute_plane(arena, plane, x, y, width, height) {
            panic!("convolution precondition violated: {e}");
        }
    }

    /// Checked twin of [`execute_plane`](Convolver::execute_plane).
    pub fn try_execute_plane(
        &self,
        arena: &mut Arena,
        plane: &Plane,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<(), ConvolveError> {
        self.check_dims(width, height)?;
        let taps = Taps::from_slice(arena.floats(self.kernel));
        let (plane_bytes, scratch_bytes) = arena.disjoint_mut(plane.region(), self.scratch);
        let scratch: &mut [f32] = bytemuck::cast_slice_mut(scratch_bytes);
        let mut full = PixelsMut::new(plane_bytes, plane.width(), plane.height(), plane.stride())
            .expect("plane geometry is validated at allocation");
        let mut tile = full.view_mut(x, y, width, height)?;
        convolve(&taps, self.radius, scratch, &mut tile);
        Ok(())
    }

    fn check_dims(&self, width: usize, height: usize) -> Result<(), ConvolveError> {
        if width > self.max_width {
            return Err(ConvolveError::WidthExceedsMax {
                width,
                max_width: self.max_width,
            });
        }
        if height > self.max_height {
            return Err(ConvolveError::HeightExceedsMax {
                height,
                max_height: self.max_height,
            });
        }
        if height < 2 * self.radius + 1 {
            return Err(ConvolveError::HeightBelowKernel {
                height,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// Two-pass separable convolution, in place.
///
/// Pass 1 convolves along x for rows `[R, height-R)` — the border rows
/// are zero by assumption and contribute nothing — and stores the float
/// results transposed in `scratch`, so pass 2 reads each column as a
/// contiguous run. Pass 2 convolves that run along y for every output
/// row, offset by `2R` to account for the rows pass 1 did not produce,
/// and quantizes back into the image.
///
/// Near an edge the kernel window is narrowed (the `k0`/`p0`/`s0`
/// clamps) rather than the addresses: out-of-range taps would multiply
/// zeros anyway, so skipping them changes nothing and keeps every index
/// in range.
fn convolve(kernel: &[f32], radius: usize, scratch: &mut [f32], image: &mut PixelsMut<'_>) {
    let width = image.width();
    let height = image.height();
    let taps = 2 * radius + 1;
    let kernel = &kernel[..taps];

    // Transposed scratch layout: column x of the image is row x of the
    // scratch, `rows` floats long.
    let rows = height - 2 * radius;
    let scratch = &mut scratch[..width * rows];

    for yi in 0..rows {
        let row = image.row(yi + radius);
        for x in 0..width {
            let k0 = radius.saturating_sub(x);
            let p0 = x.saturating_sub(radius);
            let n = (taps - k0).min(width - p0);
            let mut sum = 0.0f32;
            for i in 0..n {
                sum += to_norm(row[p0 + i]) * kernel[k0 + i];
            }
            scratch[x * rows + yi] = sum;
        }
    }

    let span = 2 * radius;
    for x in 0..width {
        let column = &scratch[x * rows..(x + 1) * rows];
        for y in 0..height {
            let k0 = span.saturating_sub(y);
            let s0 = y.saturating_sub(span);
            let n = (taps - k0).min(rows - s0);
            let mut sum = 0.0f32;
            for i in 0..n {
                sum += column[s0 + i] * kernel[k0 + i];
            }
            image.put(x, y, to_byte(sum));
        }
    }
}
