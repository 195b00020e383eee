//! Single-threaded Game of Life engine.
//!
//! [`LifeWorld`] exclusively owns the grid store, active region, alive
//! index, generation counter, history ring, frozen initial state and run
//! flag. All mutating methods take `&mut self`; wrap it in a
//! [`LifeEngine`](crate::LifeEngine) to share it across threads.
//!
//! # Generation navigation
//!
//! ```text
//! seek(t):  t < 0         -> InvalidArgument
//!           t == 0        -> frozen initial state (pure read)
//!           t > current   -> step() until current == t or extinct
//!           t <= current  -> pop (current - t) snapshots, rebuild grid
//! ```

use std::fmt;
use std::time::Instant;

use gol_core::{
    ActiveRegion, AliveIndex, AliveSnapshot, Cell, Coord, Generation, Grid, GridStore,
    InvariantViolation, RegionBounds, SeekError, StepError, ToggleError,
};
use tracing::{debug, error, info};

use crate::config::{ConfigError, EngineConfig};
use crate::history::HistoryRing;
use crate::metrics::StepMetrics;
use crate::transition;

// ── StepReport ──────────────────────────────────────────────────

/// Result of a committed [`LifeWorld::step()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// The generation that was just committed.
    pub generation: Generation,
    /// Population after the step.
    pub population: usize,
    /// `true` when the step left no live cells: stepping further is
    /// pointless and will be refused.
    pub extinct: bool,
    /// Timing and birth/death counts for this step.
    pub metrics: StepMetrics,
}

// ── GridView ────────────────────────────────────────────────────

/// An owned copy of a grid together with the generation it shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridView {
    /// Generation the grid belongs to.
    pub generation: Generation,
    /// The cells.
    pub grid: Grid,
}

// ── LifeWorld ───────────────────────────────────────────────────

/// The Game of Life engine state and operations.
pub struct LifeWorld {
    config: EngineConfig,
    store: GridStore,
    region: ActiveRegion,
    alive: AliveIndex,
    generation: Generation,
    history: HistoryRing,
    initial: Option<Grid>,
    running: bool,
    last_metrics: StepMetrics,
}

impl LifeWorld {
    /// Create an empty world from a validated [`EngineConfig`].
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: GridStore::new(config.width, config.height)?,
            region: ActiveRegion::new(),
            alive: AliveIndex::new(),
            generation: Generation(0),
            history: HistoryRing::new(config.history_depth),
            initial: None,
            running: false,
            last_metrics: StepMetrics::default(),
            config,
        })
    }

    // ── Editing ─────────────────────────────────────────────────

    /// Flip the cell at `coord` and return its new state.
    ///
    /// Out-of-grid coordinates are rejected with state unchanged.
    pub fn toggle(&mut self, coord: Coord) -> Result<Cell, ToggleError> {
        let next = self.store.current().get(coord)?.toggled();
        match next {
            Cell::Alive => self.alive.add(coord)?,
            Cell::Dead => self.alive.remove(coord)?,
        }
        self.store.toggle(coord)?;
        self.region.extend(coord);
        Ok(next)
    }

    /// Freeze the current grid as generation 0 and raise the run flag.
    pub fn start(&mut self) {
        self.initial = Some(self.store.current().clone());
        self.running = true;
        info!(
            population = self.alive.len(),
            generation = self.generation.0,
            "simulation started"
        );
    }

    /// Return to an empty, unstarted grid. Irreversible.
    pub fn reset(&mut self) {
        self.history.clear();
        self.store.reset();
        self.initial = None;
        self.generation = Generation(0);
        self.running = false;
        self.region.clear();
        self.alive.clear();
        self.last_metrics = StepMetrics::default();
        info!("simulation reset");
    }

    // ── Stepping ────────────────────────────────────────────────

    /// Compute and commit the next generation.
    ///
    /// Refuses with [`StepError::Extinct`] when no cells are alive; no
    /// neighbour counting happens in that case. The pre-step alive set is
    /// pushed onto the history ring.
    pub fn step(&mut self) -> Result<StepReport, StepError> {
        let step_start = Instant::now();

        // 1. Nothing alive, nothing to do.
        if self.alive.is_empty() {
            return Err(StepError::Extinct {
                generation: self.generation,
            });
        }

        // 2. Live cells imply a recorded region.
        let bounds = self.region.bounds().ok_or_else(|| {
            self.violation(InvariantViolation::UnsetRegion {
                population: self.alive.len(),
            })
        })?;

        // 3. Evaluate against the current grid only.
        let eval_start = Instant::now();
        let t = transition::evaluate(self.store.current(), &bounds)
            .map_err(|e| self.violation(InvariantViolation::Border(e)))?;
        let evaluate_us = eval_start.elapsed().as_micros() as u64;

        // 4. Apply: index first (validated as a whole), then the grid.
        let before = self.alive.snapshot();
        if let Err(e) = self.alive.apply(&t.births, &t.deaths) {
            return Err(self.violation(InvariantViolation::Index(e)).into());
        }
        if let Err(e) = self.store.commit(&t.births, &t.deaths) {
            self.alive.restore(before);
            return Err(self.violation(InvariantViolation::Border(e)).into());
        }
        for &coord in &t.births {
            self.region.extend(coord);
        }

        // 5. Record history and advance.
        self.history.push(before);
        self.generation = self.generation.next();

        let population = self.alive.len();
        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            evaluate_us,
            scanned_cells: t.scanned,
            births: t.births.len(),
            deaths: t.deaths.len(),
            population,
        };
        self.last_metrics = metrics.clone();
        debug!(
            generation = self.generation.0,
            births = metrics.births,
            deaths = metrics.deaths,
            population,
            scanned = metrics.scanned_cells,
            "step committed"
        );

        Ok(StepReport {
            generation: self.generation,
            population,
            extinct: population == 0,
            metrics,
        })
    }

    fn violation(&self, v: InvariantViolation) -> InvariantViolation {
        error!(generation = self.generation.0, violation = %v, "engine invariant violated");
        v
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Move to generation `target` and return its grid.
    ///
    /// Forward seeks step until the target or extinction. Backward seeks
    /// rewind through the history ring and fail with
    /// [`SeekError::OutOfRange`] (nothing mutated) when the gap exceeds
    /// what the ring retains. `seek(0)` is a pure read of the frozen
    /// initial state.
    pub fn seek(&mut self, target: i64) -> Result<GridView, SeekError> {
        if target < 0 {
            return Err(SeekError::InvalidArgument { requested: target });
        }
        let target = Generation(target as u64);
        if target.0 == 0 {
            let grid = self.initial.clone().ok_or(SeekError::NotStarted)?;
            return Ok(GridView {
                generation: target,
                grid,
            });
        }

        if target > self.generation {
            while self.generation < target {
                match self.step() {
                    Ok(_) => {}
                    Err(StepError::Extinct { generation }) => {
                        debug!(
                            generation = generation.0,
                            target = target.0,
                            "forward seek stopped early: extinct"
                        );
                        break;
                    }
                    Err(StepError::Invariant(v)) => return Err(SeekError::Invariant(v)),
                }
            }
            return Ok(self.view());
        }

        let difference = (self.generation.0 - target.0) as usize;
        if difference > self.history.len() {
            return Err(SeekError::OutOfRange {
                current: self.generation,
                requested: target,
                retained: self.history.len(),
            });
        }
        if difference > 0 {
            for _ in 0..difference {
                let snapshot = self.history.pop_newest().ok_or_else(|| {
                    self.violation(InvariantViolation::HistoryExhausted {
                        generation: self.generation,
                    })
                })?;
                self.alive.restore(snapshot);
                self.generation = Generation(self.generation.0 - 1);
            }
            self.store
                .rebuild(self.alive.iter())
                .map_err(|e| self.violation(InvariantViolation::Border(e)))?;
            debug!(
                generation = self.generation.0,
                rewound = difference,
                population = self.alive.len(),
                "rewound"
            );
        }
        Ok(self.view())
    }

    /// Seek relative to the current generation, clamping at generation 0.
    pub fn jump_by(&mut self, delta: i64) -> Result<GridView, SeekError> {
        let current = i64::try_from(self.generation.0).unwrap_or(i64::MAX);
        self.seek(current.saturating_add(delta).max(0))
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Owned copy of the current grid tagged with its generation.
    pub fn view(&self) -> GridView {
        GridView {
            generation: self.generation,
            grid: self.store.current().clone(),
        }
    }

    /// Current generation number.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        self.store.current()
    }

    /// The grid as it was before the latest step or rewind.
    pub fn previous_grid(&self) -> &Grid {
        self.store.previous()
    }

    /// Cells that differ between the current and previous grids.
    pub fn changed_cells(&self) -> Vec<Coord> {
        self.store.changed_cells()
    }

    /// Unclamped active-region bounds, `None` if nothing was toggled since reset.
    pub fn region(&self) -> Option<RegionBounds> {
        self.region.bounds()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.alive.len()
    }

    /// Whether no cells are alive.
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Whether `start()` has been called since the last reset.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Copy of the live-cell set in index order.
    pub fn alive_cells(&self) -> AliveSnapshot {
        self.alive.snapshot()
    }

    /// The frozen generation-0 grid, if started.
    pub fn initial_state(&self) -> Option<&Grid> {
        self.initial.as_ref()
    }

    /// The history ring.
    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    /// Metrics from the most recent committed step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The configuration this world was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether the alive index and the grid describe the same cells.
    pub fn is_consistent(&self) -> bool {
        let grid = self.store.current();
        grid.population() == self.alive.len()
            && self
                .alive
                .iter()
                .all(|c| grid.get(c).is_ok_and(Cell::is_alive))
    }
}

impl fmt::Debug for LifeWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifeWorld")
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .field("generation", &self.generation)
            .field("population", &self.alive.len())
            .field("history", &self.history.len())
            .field("running", &self.running)
            .finish()
    }
}
