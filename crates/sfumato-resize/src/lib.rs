//! Checkpoint-bracketed batch resize orchestration.
//!
//! Sfumato does not implement a general resampling algorithm — that lives
//! behind the [`Resampler`] trait, the way the original atlas pipeline
//! delegates to an external resize library. What this crate owns is the
//! batching discipline: every batch shares one geometry, the resampler
//! builds its per-batch state once, and the whole batch runs between
//! [`Arena::save`](sfumato_arena::Arena::save) and
//! [`Arena::restore`](sfumato_arena::Arena::restore) so the resampler's
//! transient allocations are reclaimed wholesale when the batch ends —
//! success or failure.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod batch;
pub mod error;
pub mod resampler;

pub use batch::resize_batch;
pub use error::ResizeError;
pub use resampler::{Resampler, ResizeGeometry, Tile, TilePair};
