//! Engine and stepper configuration, validation, and error types.
//!
//! [`EngineConfig`] sizes the grid and the history ring; [`StepperConfig`]
//! controls the background role's lock budget and autoplay cadence. Both
//! are plain structs meant to be built with struct-update syntax over
//! `Default` and checked with `validate()` before use.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use gol_core::GridError;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during configuration validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height below 3: the grid would have no interior cell.
    GridTooSmall {
        /// Configured width.
        width: usize,
        /// Configured height.
        height: usize,
    },
    /// The grid could not be allocated.
    Grid(GridError),
    /// History depth is zero.
    HistoryDepthZero,
    /// The stepper's lock timeout is zero.
    LockTimeoutZero,
    /// The autoplay tick interval is zero.
    TickIntervalZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridTooSmall { width, height } => {
                write!(f, "grid {width}x{height} is below the 3x3 minimum")
            }
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::HistoryDepthZero => write!(f, "history_depth must be at least 1"),
            Self::LockTimeoutZero => write!(f, "lock_timeout must be non-zero"),
            Self::TickIntervalZero => write!(f, "tick_interval must be non-zero"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── EngineConfig ───────────────────────────────────────────────────

/// Configuration for [`LifeWorld`](crate::LifeWorld) and
/// [`LifeEngine`](crate::LifeEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grid width in cells. Default: 500. Minimum: 3.
    pub width: usize,
    /// Grid height in cells. Default: 500. Minimum: 3.
    pub height: usize,
    /// Number of past generations retained for rewind. Default: 64. Minimum: 1.
    pub history_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            history_depth: 64,
        }
    }
}

impl EngineConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::Grid(GridError::DimensionTooLarge {
                width: self.width,
                height: self.height,
            }));
        }
        if self.history_depth == 0 {
            return Err(ConfigError::HistoryDepthZero);
        }
        Ok(())
    }
}

// ── StepperConfig ──────────────────────────────────────────────────

/// Configuration for the background [`Stepper`](crate::Stepper).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepperConfig {
    /// Longest the worker waits for the engine lock before skipping a
    /// tick. Default: 1 s.
    pub lock_timeout: Duration,
    /// Autoplay cadence: one step request per interval. Default: 27 ms
    /// (about 1100 ms spread over 40 frames).
    pub tick_interval: Duration,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(1),
            tick_interval: Duration::from_millis(1100 / 40),
        }
    }
}

impl StepperConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lock_timeout.is_zero() {
            return Err(ConfigError::LockTimeoutZero);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::TickIntervalZero);
        }
        Ok(())
    }
}
