//! Convolution engine error types.

use std::error::Error;
use std::fmt;

use sfumato_arena::ArenaError;
use sfumato_core::GeometryError;

/// Errors from constructing or running a [`Convolver`](crate::Convolver).
///
/// On the panicking entry points every variant is a fatal precondition
/// violation; the `try_` twins return them as values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvolveError {
    /// The kernel radius must be at least 1.
    RadiusTooSmall {
        /// The offending radius.
        radius: usize,
    },
    /// The image is wider than the scratch plane allows.
    WidthExceedsMax {
        /// Image width.
        width: usize,
        /// Maximum width fixed at setup.
        max_width: usize,
    },
    /// The image is taller than the scratch plane allows.
    HeightExceedsMax {
        /// Image height.
        height: usize,
        /// Maximum height fixed at setup.
        max_height: usize,
    },
    /// The image is too short to hold even one full kernel window.
    HeightBelowKernel {
        /// Image height.
        height: usize,
        /// Kernel radius; the image must be at least `2*radius + 1` tall.
        radius: usize,
    },
    /// A tile rectangle does not fit its plane.
    Geometry(GeometryError),
    /// Kernel or scratch allocation failed.
    Arena(ArenaError),
}

impl fmt::Display for ConvolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RadiusTooSmall { radius } => {
                write!(f, "kernel radius must be >= 1, got {radius}")
            }
            Self::WidthExceedsMax { width, max_width } => {
                write!(f, "image width {width} exceeds maximum {max_width}")
            }
            Self::HeightExceedsMax { height, max_height } => {
                write!(f, "image height {height} exceeds maximum {max_height}")
            }
            Self::HeightBelowKernel { height, radius } => {
                write!(
                    f,
                    "image height {height} is below the kernel span {} for radius {radius}",
                    2 * radius + 1
                )
            }
            Self::Geometry(e) => write!(f, "tile geometry invalid: {e}"),
            Self::Arena(e) => write!(f, "arena allocation failed: {e}"),
        }
    }
}

impl Error for ConvolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for ConvolveError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}

impl From<GeometryError> for ConvolveError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}
