//! Geometry validation errors for pixel views.

use std::error::Error;
use std::fmt;

/// Errors from constructing or carving a pixel view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// The row stride is smaller than the row width.
    StrideTooSmall {
        /// Declared stride in bytes.
        stride: usize,
        /// Declared width in pixels.
        width: usize,
    },
    /// The backing buffer cannot hold the declared dimensions.
    BufferTooSmall {
        /// Bytes available.
        len: usize,
        /// Bytes the declared geometry requires.
        needed: usize,
    },
    /// A sub-rectangle extends past the parent view.
    RectOutOfBounds {
        /// Requested origin (x, y).
        origin: (usize, usize),
        /// Requested size (width, height).
        size: (usize, usize),
    },
    /// A dimension product overflows `usize`.
    SizeOverflow,
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrideTooSmall { stride, width } => {
                write!(f, "stride {stride} is smaller than width {width}")
            }
            Self::BufferTooSmall { len, needed } => {
                write!(f, "buffer holds {len} bytes, geometry requires {needed}")
            }
            Self::RectOutOfBounds { origin, size } => {
                write!(
                    f,
                    "rect {}x{} at ({}, {}) exceeds the parent view",
                    size.0, size.1, origin.0, origin.1
                )
            }
            Self::SizeOverflow => write!(f, "dimension product overflows usize"),
        }
    }
}

impl Error for GeometryError {}
