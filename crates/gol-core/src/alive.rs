//! Index of live cells, kept in lockstep with the grid.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::error::IndexError;
use crate::id::Coord;

/// Insertion-ordered, duplicate-free set of live coordinates.
///
/// The order carries no meaning for the transition rule; it is preserved
/// so snapshots and restores reproduce exactly the same sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliveIndex {
    cells: IndexSet<Coord>,
}

/// An independent copy of an [`AliveIndex`], stored in the history ring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliveSnapshot {
    cells: Vec<Coord>,
}

impl AliveSnapshot {
    /// Number of live cells in the snapshot.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the snapshot has no live cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The live coordinates in index order.
    pub fn as_slice(&self) -> &[Coord] {
        &self.cells
    }

    /// Iterate over the live coordinates.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.cells.iter()
    }

    /// The live coordinates, sorted row-major. Convenient for comparisons.
    pub fn sorted(&self) -> Vec<Coord> {
        let mut v = self.cells.clone();
        v.sort_unstable();
        v
    }
}

impl<'a> IntoIterator for &'a AliveSnapshot {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl AliveIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly live cell. Fails if it is already recorded.
    pub fn add(&mut self, coord: Coord) -> Result<(), IndexError> {
        if self.cells.insert(coord) {
            Ok(())
        } else {
            Err(IndexError::DuplicateAdd { coord })
        }
    }

    /// Forget a cell that died. Fails if it was not recorded.
    pub fn remove(&mut self, coord: Coord) -> Result<(), IndexError> {
        if self.cells.shift_remove(&coord) {
            Ok(())
        } else {
            Err(IndexError::MissingRemove { coord })
        }
    }

    /// Apply one generation's births and deaths as a single update.
    ///
    /// Every birth must be absent (and unique) and every death present;
    /// all of this is checked before the index is touched, so a failed
    /// call leaves it unchanged.
    pub fn apply(&mut self, births: &[Coord], deaths: &[Coord]) -> Result<(), IndexError> {
        let mut born = HashSet::with_capacity(births.len());
        for &coord in births {
            if self.cells.contains(&coord) || !born.insert(coord) {
                return Err(IndexError::DuplicateAdd { coord });
            }
        }
        let mut dead = HashSet::with_capacity(deaths.len());
        for &coord in deaths {
            if !self.cells.contains(&coord) || !dead.insert(coord) {
                return Err(IndexError::MissingRemove { coord });
            }
        }
        if !dead.is_empty() {
            self.cells.retain(|c| !dead.contains(c));
        }
        self.cells.extend(births.iter().copied());
        Ok(())
    }

    /// Whether `coord` is recorded as alive.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Number of live cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells are alive. An empty index ends the simulation.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over live cells in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    /// Independent copy for the history ring.
    pub fn snapshot(&self) -> AliveSnapshot {
        AliveSnapshot {
            cells: self.cells.iter().copied().collect(),
        }
    }

    /// Replace the whole index with a previously taken snapshot.
    pub fn restore(&mut self, snapshot: AliveSnapshot) {
        self.cells = snapshot.cells.into_iter().collect();
    }

    /// Forget every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: usize, y: usize) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn add_rejects_duplicate() {
        let mut idx = AliveIndex::new();
        idx.add(c(1, 1)).unwrap();
        assert_eq!(
            idx.add(c(1, 1)),
            Err(IndexError::DuplicateAdd { coord: c(1, 1) })
        );
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn remove_rejects_missing() {
        let mut idx = AliveIndex::new();
        assert_eq!(
            idx.remove(c(2, 2)),
            Err(IndexError::MissingRemove { coord: c(2, 2) })
        );
    }

    #[test]
    fn remove_preserves_insertion_order() {
        let mut idx = AliveIndex::new();
        for coord in [c(3, 0), c(1, 0), c(2, 0)] {
            idx.add(coord).unwrap();
        }
        idx.remove(c(1, 0)).unwrap();
        assert_eq!(idx.iter().collect::<Vec<_>>(), vec![c(3, 0), c(2, 0)]);
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut idx = AliveIndex::new();
        idx.add(c(1, 1)).unwrap();
        idx.add(c(2, 2)).unwrap();
        let before = idx.clone();

        // Second death is missing: nothing may change.
        let err = idx.apply(&[c(5, 5)], &[c(1, 1), c(9, 9)]).unwrap_err();
        assert_eq!(err, IndexError::MissingRemove { coord: c(9, 9) });
        assert_eq!(idx, before);

        // Birth duplicates a live cell.
        let err = idx.apply(&[c(2, 2)], &[]).unwrap_err();
        assert_eq!(err, IndexError::DuplicateAdd { coord: c(2, 2) });

        // Birth listed twice.
        assert!(idx.apply(&[c(4, 4), c(4, 4)], &[]).is_err());
        assert_eq!(idx, before);

        idx.apply(&[c(5, 5)], &[c(1, 1)]).unwrap();
        assert_eq!(idx.iter().collect::<Vec<_>>(), vec![c(2, 2), c(5, 5)]);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut idx = AliveIndex::new();
        idx.add(c(1, 1)).unwrap();
        let snap = idx.snapshot();
        idx.add(c(2, 2)).unwrap();
        assert_eq!(snap.len(), 1);

        idx.restore(snap.clone());
        assert_eq!(idx.len(), 1);
        assert!(idx.contains(c(1, 1)));
        assert!(!idx.contains(c(2, 2)));
        assert_eq!(snap.as_slice(), &[c(1, 1)]);
    }

    #[test]
    fn snapshot_sorted_is_row_major() {
        let mut idx = AliveIndex::new();
        for coord in [c(0, 3), c(4, 1), c(2, 1)] {
            idx.add(coord).unwrap();
        }
        assert_eq!(idx.snapshot().sorted(), vec![c(2, 1), c(4, 1), c(0, 3)]);
    }
}
