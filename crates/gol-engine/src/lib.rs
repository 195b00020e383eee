//! Game of Life simulation engine.
//!
//! Provides [`LifeWorld`], the single-threaded engine that owns the grid,
//! active region, alive index, generation counter and history ring, and
//! [`LifeEngine`], the same engine behind one mutual-exclusion lock so a
//! foreground editor and the background [`Stepper`] can share it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod stepper;
pub mod transition;
pub mod world;

pub use config::{ConfigError, EngineConfig, StepperConfig};
pub use engine::{EngineView, LifeEngine};
pub use history::HistoryRing;
pub use metrics::StepMetrics;
pub use stepper::{StepEvent, Stepper, StepperError};
pub use transition::Transition;
pub use world::{GridView, LifeWorld, StepReport};
