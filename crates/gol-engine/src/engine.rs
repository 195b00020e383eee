//! Shared, lock-protected engine.
//!
//! [`LifeEngine`] puts a [`LifeWorld`] behind a single
//! [`parking_lot::Mutex`]. Every operation holds the lock for its whole
//! duration, so a foreground editor and the background stepper never
//! observe a half-applied step or edit. Accessors return owned copies.

use std::time::Duration;

use gol_core::{
    AliveSnapshot, Cell, Coord, Generation, Grid, RegionBounds, SeekError, StepError, ToggleError,
};
use parking_lot::{Mutex, MutexGuard};

use crate::config::{ConfigError, EngineConfig};
use crate::metrics::StepMetrics;
use crate::world::{GridView, LifeWorld, StepReport};

/// Consistent copy of the engine's observable state, taken under one lock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineView {
    /// Current generation.
    pub generation: Generation,
    /// Current grid.
    pub grid: Grid,
    /// Number of live cells.
    pub population: usize,
    /// Unclamped active-region bounds.
    pub region: Option<RegionBounds>,
    /// Run flag.
    pub running: bool,
}

/// A [`LifeWorld`] shared between threads.
pub struct LifeEngine {
    world: Mutex<LifeWorld>,
}

impl LifeEngine {
    /// Build an engine around a fresh world.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_world(LifeWorld::new(config)?))
    }

    /// Wrap an existing world.
    pub fn from_world(world: LifeWorld) -> Self {
        Self {
            world: Mutex::new(world),
        }
    }

    /// Exclusive access for a multi-operation session.
    ///
    /// The background stepper is blocked for as long as the guard lives.
    pub fn lock(&self) -> MutexGuard<'_, LifeWorld> {
        self.world.lock()
    }

    /// Run `f` with shared access under the lock.
    pub fn with_world<R>(&self, f: impl FnOnce(&LifeWorld) -> R) -> R {
        f(&*self.world.lock())
    }

    /// See [`LifeWorld::toggle`].
    pub fn toggle(&self, coord: Coord) -> Result<Cell, ToggleError> {
        self.world.lock().toggle(coord)
    }

    /// See [`LifeWorld::start`].
    pub fn start(&self) {
        self.world.lock().start();
    }

    /// See [`LifeWorld::reset`].
    pub fn reset(&self) {
        self.world.lock().reset();
    }

    /// See [`LifeWorld::step`]. Blocks until the lock is free.
    pub fn step(&self) -> Result<StepReport, StepError> {
        self.world.lock().step()
    }

    /// Step if the lock can be acquired within `timeout`.
    ///
    /// Returns `None` when the wait expires; nothing is mutated in that case.
    pub fn try_step_for(&self, timeout: Duration) -> Option<Result<StepReport, StepError>> {
        self.world.try_lock_for(timeout).map(|mut w| w.step())
    }

    /// See [`LifeWorld::seek`].
    pub fn seek(&self, target: i64) -> Result<GridView, SeekError> {
        self.world.lock().seek(target)
    }

    /// See [`LifeWorld::jump_by`].
    pub fn jump_by(&self, delta: i64) -> Result<GridView, SeekError> {
        self.world.lock().jump_by(delta)
    }

    /// Snapshot of generation, grid, population, region and run flag.
    pub fn view(&self) -> EngineView {
        let w = self.world.lock();
        EngineView {
            generation: w.generation(),
            grid: w.grid().clone(),
            population: w.population(),
            region: w.region(),
            running: w.is_running(),
        }
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.world.lock().generation()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.world.lock().population()
    }

    /// Whether `start()` has been called since the last reset.
    pub fn is_running(&self) -> bool {
        self.world.lock().is_running()
    }

    /// Copy of the live-cell set.
    pub fn alive_cells(&self) -> AliveSnapshot {
        self.world.lock().alive_cells()
    }

    /// Metrics from the most recent committed step.
    pub fn last_metrics(&self) -> StepMetrics {
        self.world.lock().last_metrics().clone()
    }
}

impl std::fmt::Debug for LifeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.world.try_lock() {
            Some(w) => f.debug_struct("LifeEngine").field("world", &*w).finish(),
            None => f
                .debug_struct("LifeEngine")
                .field("world", &"<locked>")
                .finish(),
        }
    }
}
