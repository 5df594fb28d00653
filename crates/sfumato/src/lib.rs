//! Sfumato: monochrome bitmap processing for texture-atlas pipelines.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Sfumato sub-crates. For most users, adding `sfumato` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sfumato::prelude::*;
//!
//! // One arena backs everything: engine state, atlas planes, and the
//! // transients of resize batches.
//! let mut arena = Arena::new();
//!
//! // A radius-2 blur engine for images up to 64x64. The kernel is the
//! // caller's to fill; here a unit-sum binomial.
//! let conv = Convolver::new(&mut arena, 2, 64, 64).unwrap();
//! conv.weights_mut(&mut arena)
//!     .copy_from_slice(&[1.0 / 16.0, 4.0 / 16.0, 6.0 / 16.0, 4.0 / 16.0, 1.0 / 16.0]);
//!
//! // Blur a single bright pixel (the required zero border is the whole
//! // rest of the image).
//! let mut buf = vec![0u8; 16 * 16];
//! buf[8 * 16 + 8] = 255;
//! let view = PixelsMut::new(&mut buf, 16, 16, 16).unwrap();
//! conv.execute(&mut arena, view);
//!
//! assert_eq!(buf[8 * 16 + 8], 36); // 6/16 * 6/16 * 256
//! assert_eq!(buf[8 * 16 + 9], 24); // 6/16 * 4/16 * 256
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `sfumato-arena` | Growable checkpointed arena, backing stores, planes |
//! | [`types`] | `sfumato-core` | Pixel views, sample conversion |
//! | [`blur`] | `sfumato-blur` | Separable convolution engine, gaussian kernels |
//! | [`resize`] | `sfumato-resize` | Batched resize orchestration over a `Resampler` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use sfumato_arena as arena;
pub use sfumato_blur as blur;
pub use sfumato_core as types;
pub use sfumato_resize as resize;

/// The types most callers need, in one import.
pub mod prelude {
    pub use sfumato_arena::{Arena, ArenaError, BackingStore, HeapStore, Plane, Region};
    pub use sfumato_blur::{fill_gaussian, gaussian_taps, ConvolveError, Convolver};
    pub use sfumato_core::{GeometryError, Pixels, PixelsMut};
    pub use sfumato_resize::{
        resize_batch, Resampler, ResizeError, ResizeGeometry, Tile, TilePair,
    };
}
