//! Test utilities and mock types for Sfumato development.
//!
//! Mock backing stores for observing arena growth, minimal resamplers for
//! driving the batch orchestrator, and image fixtures with the zero
//! border the convolution engine assumes.

pub mod images;
pub mod resamplers;
pub mod stores;

pub use images::{point_image, solid_interior};
pub use resamplers::{FailingResampler, NearestResampler};
pub use stores::{CountingStore, GrowthLog};
