//! Error types for the Game of Life engine.
//!
//! Organized by subsystem: grid addressing, alive-index bookkeeping,
//! transitions, generation navigation and edits. [`InvariantViolation`]
//! is reserved for engine bugs and is never produced by bad input.

use std::error::Error;
use std::fmt;

use crate::id::{Coord, Generation};

/// Errors from grid construction and addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside `[0, width) x [0, height)`.
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// A neighbourhood was requested for a cell on the outer border,
    /// where the 3x3 ring is incomplete.
    BorderCell {
        /// The border coordinate.
        coord: Coord,
    },
    /// A grid was constructed with a zero dimension.
    EmptyGrid {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// `width * height` does not fit in `usize`.
    DimensionTooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                coord,
                width,
                height,
            } => write!(f, "coordinate {coord} outside {width}x{height} grid"),
            Self::BorderCell { coord } => {
                write!(f, "cell {coord} lies on the grid border")
            }
            Self::EmptyGrid { width, height } => {
                write!(f, "grid {width}x{height} has no cells")
            }
            Self::DimensionTooLarge { width, height } => {
                write!(f, "grid {width}x{height} exceeds addressable size")
            }
        }
    }
}

impl Error for GridError {}

/// Alive-index bookkeeping failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// The coordinate was already recorded as alive.
    DuplicateAdd {
        /// The duplicated coordinate.
        coord: Coord,
    },
    /// The coordinate was not recorded as alive.
    MissingRemove {
        /// The missing coordinate.
        coord: Coord,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAdd { coord } => write!(f, "cell {coord} already in alive index"),
            Self::MissingRemove { coord } => write!(f, "cell {coord} missing from alive index"),
        }
    }
}

impl Error for IndexError {}

/// An internal consistency check failed. Always an engine bug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The alive index disagreed with the requested mutation.
    Index(IndexError),
    /// The transition tried to evaluate a border or out-of-grid cell.
    Border(GridError),
    /// Live cells exist but no active region was ever recorded.
    UnsetRegion {
        /// Population at the time of the failed step.
        population: usize,
    },
    /// The history ring ran dry during a rewind it had admitted.
    HistoryExhausted {
        /// Generation at which the ring was found empty.
        generation: Generation,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(e) => write!(f, "alive index: {e}"),
            Self::Border(e) => write!(f, "transition: {e}"),
            Self::UnsetRegion { population } => {
                write!(f, "active region unset with {population} live cells")
            }
            Self::HistoryExhausted { generation } => {
                write!(f, "history ring empty while rewinding at generation {generation}")
            }
        }
    }
}

impl Error for InvariantViolation {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Index(e) => Some(e),
            Self::Border(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IndexError> for InvariantViolation {
    fn from(e: IndexError) -> Self {
        Self::Index(e)
    }
}

/// Errors from `step()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// No live cells remain; no further generations are possible.
    Extinct {
        /// The generation at which stepping was refused.
        generation: Generation,
    },
    /// The engine detected a bug in its own bookkeeping.
    Invariant(InvariantViolation),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extinct { generation } => {
                write!(f, "no live cells at generation {generation}; no further generations possible")
            }
            Self::Invariant(e) => write!(f, "invariant violation: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invariant(e) => Some(e),
            Self::Extinct { .. } => None,
        }
    }
}

impl From<InvariantViolation> for StepError {
    fn from(e: InvariantViolation) -> Self {
        Self::Invariant(e)
    }
}

impl From<IndexError> for StepError {
    fn from(e: IndexError) -> Self {
        Self::Invariant(InvariantViolation::Index(e))
    }
}

/// Errors from `seek()` and `jump_by()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeekError {
    /// The requested generation is negative.
    InvalidArgument {
        /// The requested generation.
        requested: i64,
    },
    /// The requested generation has been evicted from the history ring.
    OutOfRange {
        /// Generation at the time of the request.
        current: Generation,
        /// The requested generation.
        requested: Generation,
        /// Number of past generations the ring still retains.
        retained: usize,
    },
    /// Generation 0 was requested before `start()` froze it.
    NotStarted,
    /// The engine detected a bug in its own bookkeeping.
    Invariant(InvariantViolation),
}

impl fmt::Display for SeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { requested } => {
                write!(f, "generation {requested} does not exist")
            }
            Self::OutOfRange {
                current,
                requested,
                retained,
            } => write!(
                f,
                "generation {requested} is no longer reconstructible: current {current}, \
                 gap {}, history retains {retained}",
                current.0.saturating_sub(requested.0)
            ),
            Self::NotStarted => write!(f, "initial state not frozen; call start() first"),
            Self::Invariant(e) => write!(f, "invariant violation: {e}"),
        }
    }
}

impl Error for SeekError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invariant(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InvariantViolation> for SeekError {
    fn from(e: InvariantViolation) -> Self {
        Self::Invariant(e)
    }
}

/// Errors from `toggle()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleError {
    /// The coordinate is outside the grid. State is unchanged.
    OutOfBounds(GridError),
    /// The alive index disagreed with the grid.
    Invariant(InvariantViolation),
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(e) => write!(f, "{e}"),
            Self::Invariant(e) => write!(f, "invariant violation: {e}"),
        }
    }
}

impl Error for ToggleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OutOfBounds(e) => Some(e),
            Self::Invariant(e) => Some(e),
        }
    }
}

impl From<GridError> for ToggleError {
    fn from(e: GridError) -> Self {
        Self::OutOfBounds(e)
    }
}

impl From<IndexError> for ToggleError {
    fn from(e: IndexError) -> Self {
        Self::Invariant(InvariantViolation::Index(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reports_gap() {
        let err = SeekError::OutOfRange {
            current: Generation(70),
            requested: Generation(5),
            retained: 64,
        };
        let msg = err.to_string();
        assert!(msg.contains("current 70"));
        assert!(msg.contains("gap 65"));
        assert!(msg.contains("retains 64"));
    }

    #[test]
    fn invariant_source_chains() {
        let err = StepError::from(IndexError::MissingRemove {
            coord: Coord::new(1, 2),
        });
        let inner = err.source().expect("step error wraps violation");
        assert!(inner.source().is_some());
        assert!(err.to_string().contains("(1, 2)"));
    }

    #[test]
    fn toggle_out_of_bounds_display() {
        let err = ToggleError::from(GridError::OutOfBounds {
            coord: Coord::new(10, 0),
            width: 10,
            height: 10,
        });
        assert_eq!(err.to_string(), "coordinate (10, 0) outside 10x10 grid");
    }
}
