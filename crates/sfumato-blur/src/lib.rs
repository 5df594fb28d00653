//! Separable two-pass convolution for monochrome bitmaps.
//!
//! [`Convolver`] performs fixed-radius in-place blur over strided 8-bit
//! views. The kernel and a transposed scratch plane are allocated from a
//! [`sfumato_arena::Arena`] once at construction; steady-state `execute`
//! calls allocate nothing.
//!
//! The engine assumes the image is already zero within `radius` pixels of
//! every edge (true for atlas tiles, which are padded for exactly this
//! reason). That assumption licenses narrowing the kernel window near the
//! borders instead of bounds-checking addresses, which keeps the inner
//! loops branch-light.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod kernel;

pub use engine::Convolver;
pub use error::ConvolveError;
pub use kernel::{fill_gaussian, gaussian_taps, Taps};
