//! Incremental dirty-region tracking.
//!
//! [`ActiveRegion`] is the smallest axis-aligned rectangle known to
//! contain every cell whose next-generation value could differ from its
//! current one. Every toggle and every birth grows it by the cell's
//! one-ring of influence; nothing shrinks it except [`ActiveRegion::clear`].
//! The rectangle is tracked unclamped (it may extend one cell past any
//! grid edge) and is clamped to the grid interior only when a transition
//! consumes it via [`RegionBounds::interior`].

use crate::id::Coord;

/// Corners of the tracked rectangle: `start` inclusive, `end` exclusive.
///
/// Signed so that the one-cell margin around column/row 0 is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegionBounds {
    /// Inclusive lower corner `(x, y)`.
    pub start: (i64, i64),
    /// Exclusive upper corner `(x, y)`.
    pub end: (i64, i64),
}

impl RegionBounds {
    /// The influence rectangle of a single cell: `coord - 1 .. coord + 2`.
    pub fn around(coord: Coord) -> Self {
        let (x, y) = (coord.x as i64, coord.y as i64);
        Self {
            start: (x - 1, y - 1),
            end: (x + 2, y + 2),
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: (self.start.0.min(other.start.0), self.start.1.min(other.start.1)),
            end: (self.end.0.max(other.end.0), self.end.1.max(other.end.1)),
        }
    }

    /// Whether `coord` lies inside the unclamped rectangle.
    pub fn contains(&self, coord: Coord) -> bool {
        let (x, y) = (coord.x as i64, coord.y as i64);
        (self.start.0..self.end.0).contains(&x) && (self.start.1..self.end.1).contains(&y)
    }

    /// Number of cells covered by the unclamped rectangle.
    pub fn area(&self) -> u64 {
        let w = (self.end.0 - self.start.0).max(0) as u64;
        let h = (self.end.1 - self.start.1).max(0) as u64;
        w * h
    }

    /// Clamp to the interior `[1, width - 1) x [1, height - 1)` of a grid,
    /// the only cells with a complete neighbourhood.
    ///
    /// Returns `None` when the clamped rectangle is empty.
    pub fn interior(&self, width: usize, height: usize) -> Option<ScanRect> {
        let clamp = |v: i64, hi: usize| v.clamp(1, hi.saturating_sub(1).max(1) as i64) as usize;
        let rect = ScanRect {
            x: clamp(self.start.0, width)..clamp(self.end.0, width),
            y: clamp(self.start.1, height)..clamp(self.end.1, height),
        };
        (!rect.is_empty()).then_some(rect)
    }
}

/// A clamped, in-grid rectangle ready to be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanRect {
    /// Column range.
    pub x: std::ops::Range<usize>,
    /// Row range.
    pub y: std::ops::Range<usize>,
}

impl ScanRect {
    /// Whether the rectangle covers no cells.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty()
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.x.len() * self.y.len()
    }

    /// Iterate row-major over the covered coordinates.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.y
            .clone()
            .flat_map(move |y| self.x.clone().map(move |x| Coord::new(x, y)))
    }
}

/// Grow-only tracker of the active region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveRegion {
    bounds: Option<RegionBounds>,
}

impl ActiveRegion {
    /// An unset region: nothing has been toggled, nothing to compute.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the rectangle to cover the influence ring of `coord`.
    pub fn extend(&mut self, coord: Coord) {
        let ring = RegionBounds::around(coord);
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(ring),
            None => ring,
        });
    }

    /// Current bounds, or `None` if nothing was ever toggled since the last clear.
    pub fn bounds(&self) -> Option<RegionBounds> {
        self.bounds
    }

    /// Whether any cell has been recorded.
    pub fn is_set(&self) -> bool {
        self.bounds.is_some()
    }

    /// Forget the region. Only a full engine reset does this.
    pub fn clear(&mut self) {
        self.bounds = None;
    }
}
