//! Core types for the Sfumato bitmap engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! bounds-checked strided pixel views used throughout the workspace and the
//! fixed u8/f32 sample conversion shared by the blur and resize paths.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pixels;
pub mod sample;

pub use error::GeometryError;
pub use pixels::{Pixels, PixelsMut};
