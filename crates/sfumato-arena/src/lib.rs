//! Growable checkpointed arena for Sfumato bitmap processing.
//!
//! The arena owns a page-granular backing store and hands out aligned,
//! offset-based allocations. There is no per-object free: reclaim is
//! wholesale ([`Arena::reset`]) or via exactly one rewindable checkpoint
//! ([`Arena::save`] / [`Arena::restore`]), which gives resize batches a
//! stack-frame-like scope for their transient allocations.
//!
//! # Architecture
//!
//! ```text
//! Arena
//! ├── Box<dyn BackingStore>   (page-granular growth; HeapStore by default)
//! ├── bytes_allocated         (bump cursor)
//! └── checkpoint              (at most one saved cursor)
//! ```
//!
//! Allocations are [`Region`]s — offsets into the store, not references —
//! so store growth never invalidates them. A region stays usable until the
//! `reset()` or `restore()` that discards it; using it after that point is
//! a caller bug, exactly like holding a pointer across a heap reset.
//!
//! # Failure model
//!
//! Misuse (double save, restore without save, reset under an active
//! checkpoint, refused growth) is a programming error in the caller and
//! panics with a diagnostic naming the violated condition. Every such
//! entry point has a `try_` twin returning [`ArenaError`] for boundaries
//! that want recoverability; the internal invariant checks are identical
//! on both paths.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod error;
pub mod plane;
pub mod region;
pub mod store;

pub use arena::Arena;
pub use error::{ArenaError, StoreError};
pub use plane::Plane;
pub use region::Region;
pub use store::{BackingStore, HeapStore, MAX_ALIGN_LOG2, PAGE_SIZE};
