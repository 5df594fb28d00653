//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors from arena operations.
///
/// Every variant is also a fatal condition on the panicking entry points;
/// the `try_` twins surface them as values instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The backing store refused to grow to the required page count.
    GrowthRefused {
        /// Total pages the allocation needed.
        requested_pages: usize,
        /// Pages committed when the request was made.
        committed_pages: usize,
    },
    /// The requested alignment exceeds [`MAX_ALIGN_LOG2`](crate::MAX_ALIGN_LOG2).
    AlignmentTooLarge {
        /// The offending power-of-two exponent.
        align_log2: u32,
    },
    /// An allocation size computation overflowed `usize`.
    SizeOverflow,
    /// `save()` or `reset()` was called while a checkpoint is active.
    CheckpointActive,
    /// `restore()` was called with no active checkpoint.
    NoCheckpoint,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthRefused {
                requested_pages,
                committed_pages,
            } => {
                write!(
                    f,
                    "backing store refused growth to {requested_pages} pages \
                     ({committed_pages} committed)"
                )
            }
            Self::AlignmentTooLarge { align_log2 } => {
                write!(f, "alignment 1<<{align_log2} exceeds the 16-byte maximum")
            }
            Self::SizeOverflow => write!(f, "allocation size overflows usize"),
            Self::CheckpointActive => write!(f, "a checkpoint is already active"),
            Self::NoCheckpoint => write!(f, "no active checkpoint"),
        }
    }
}

impl Error for ArenaError {}

/// Error from the [`BackingStore`](crate::BackingStore) host seam.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The embedding refused to commit more pages.
    Refused {
        /// Total pages requested.
        requested_pages: usize,
        /// Pages committed when the request was made.
        committed_pages: usize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refused {
                requested_pages,
                committed_pages,
            } => {
                write!(
                    f,
                    "store refused to grow to {requested_pages} pages \
                     ({committed_pages} committed)"
                )
            }
        }
    }
}

impl Error for StoreError {}

impl From<StoreError> for ArenaError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Refused {
                requested_pages,
                committed_pages,
            } => Self::GrowthRefused {
                requested_pages,
                committed_pages,
            },
        }
    }
}
