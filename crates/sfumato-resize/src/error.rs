//! Resize orchestration error types.

use std::error::Error;
use std::fmt;

use sfumato_arena::ArenaError;

/// Errors from batched resize orchestration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResizeError {
    /// A batch must contain at least one tile pair.
    EmptyBatch,
    /// A tile rectangle extends past the atlas plane.
    TileOutOfBounds {
        /// Index of the offending pair within the batch.
        index: usize,
    },
    /// Checkpoint bookkeeping failed (a batch inside a batch, or the
    /// resampler consumed the checkpoint itself).
    Arena(ArenaError),
    /// The resampler reported a failure.
    ResamplerFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ResizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBatch => write!(f, "resize batch is empty"),
            Self::TileOutOfBounds { index } => {
                write!(f, "tile pair {index} exceeds the plane bounds")
            }
            Self::Arena(e) => write!(f, "checkpoint bookkeeping failed: {e}"),
            Self::ResamplerFailed { reason } => write!(f, "resampler failed: {reason}"),
        }
    }
}

impl Error for ResizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArenaError> for ResizeError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
