//! Core types for the Game of Life engine.
//!
//! This is the leaf crate with zero internal dependencies. It holds the
//! state containers the engine mutates on every edit and transition:
//! coordinates and generation ids, the two-state [`Cell`], the [`Grid`]
//! and its double-buffered [`GridStore`], the [`ActiveRegion`] tracker,
//! the [`AliveIndex`], and the error types shared across the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alive;
pub mod cell;
pub mod error;
pub mod grid;
pub mod id;
pub mod region;
pub mod store;

pub use alive::{AliveIndex, AliveSnapshot};
pub use cell::Cell;
pub use error::{GridError, IndexError, InvariantViolation, SeekError, StepError, ToggleError};
pub use grid::Grid;
pub use id::{Coord, Generation};
pub use region::{ActiveRegion, RegionBounds, ScanRect};
pub use store::GridStore;
