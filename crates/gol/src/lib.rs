//! Conway's Game of Life on a fixed grid, with bounded rewind and a
//! background stepper.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the `gol-*` sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use gol::prelude::*;
//!
//! let mut world = LifeWorld::new(EngineConfig {
//!     width: 10,
//!     height: 10,
//!     history_depth: 16,
//! })
//! .unwrap();
//!
//! // A horizontal blinker.
//! for x in 4..7 {
//!     world.toggle(Coord::new(x, 5)).unwrap();
//! }
//! world.start();
//!
//! world.step().unwrap();
//! assert_eq!(world.grid().get(Coord::new(5, 4)).unwrap(), Cell::Alive);
//!
//! let view = world.seek(0).unwrap();
//! assert_eq!(view.grid.get(Coord::new(4, 5)).unwrap(), Cell::Alive);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gol-core` | Coordinates, cells, grid store, active region, alive index, errors |
//! | [`engine`] | `gol-engine` | `LifeWorld`, shared `LifeEngine`, history ring, background `Stepper` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`gol-core`).
///
/// Contains [`types::Grid`], [`types::ActiveRegion`], [`types::AliveIndex`]
/// and the error taxonomy.
pub use gol_core as types;

/// Simulation engines (`gol-engine`).
///
/// [`engine::LifeWorld`] for single-threaded use, [`engine::LifeEngine`]
/// plus [`engine::Stepper`] for background stepping.
pub use gol_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use gol::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gol_core::{Cell, Coord, Generation, Grid};

    // Errors
    pub use gol_core::{SeekError, StepError, ToggleError};

    // Engine
    pub use gol_engine::{
        EngineConfig, GridView, LifeEngine, LifeWorld, StepEvent, StepMetrics, StepReport,
        Stepper, StepperConfig,
    };
}
