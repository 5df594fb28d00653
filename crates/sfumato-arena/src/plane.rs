//! Monochrome bitmaps allocated inside the arena.

use sfumato_core::{Pixels, PixelsMut};

use crate::arena::Arena;
use crate::error::ArenaError;
use crate::region::Region;

/// A tightly packed (stride == width) 8-bit bitmap living in the arena.
///
/// Planes hold atlas pages and other bitmaps whose lifetime follows the
/// arena's wholesale reclaim. The pixel contents are not initialized at
/// allocation; fill or render into the plane before reading it.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    region: Region,
    width: usize,
    height: usize,
}

impl Plane {
    /// Allocate a `width`×`height` plane from the arena.
    pub fn alloc(arena: &mut Arena, width: usize, height: usize) -> Result<Self, ArenaError> {
        let pixels = width
            .checked_mul(height)
            .ok_or(ArenaError::SizeOverflow)?;
        let region = arena.try_alloc_u8(pixels)?;
        Ok(Self {
            region,
            width,
            height,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes (planes are tightly packed).
    pub fn stride(&self) -> usize {
        self.width
    }

    /// The underlying arena region.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Read-only pixel view.
    pub fn pixels<'a>(&self, arena: &'a Arena) -> Pixels<'a> {
        Pixels::new(arena.bytes(self.region), self.width, self.height, self.width)
            .expect("plane geometry is validated at allocation")
    }

    /// Mutable pixel view.
    pub fn pixels_mut<'a>(&self, arena: &'a mut Arena) -> PixelsMut<'a> {
        PixelsMut::new(
            arena.bytes_mut(self.region),
            self.width,
            self.height,
            self.width,
        )
        .expect("plane geometry is validated at allocation")
    }
}
