//! Double-buffered grid storage.
//!
//! [`GridStore`] keeps two equally sized grids that alternate between
//! "published" (the current generation, visible to readers) and "staging"
//! (where the next generation is assembled). Publishing swaps the roles,
//! so after every commit the staging buffer holds the previous generation
//! and renderers can redraw only [`changed_cells`](GridStore::changed_cells).
//!
//! ```text
//! commit:   staging <- published; apply births/deaths to staging; swap
//! rebuild:  staging <- empty;     mark alive cells in staging;   swap
//! ```

use crate::cell::Cell;
use crate::error::GridError;
use crate::grid::Grid;
use crate::id::Coord;

/// Ping-pong pair of grids: the published generation and its predecessor.
#[derive(Clone, Debug)]
pub struct GridStore {
    published: Grid,
    staging: Grid,
}

impl GridStore {
    /// Create a store with two all-dead `width x height` grids.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let published = Grid::new(width, height)?;
        Ok(Self {
            staging: published.clone(),
            published,
        })
    }

    /// The published (current) generation.
    pub fn current(&self) -> &Grid {
        &self.published
    }

    /// The generation that was published before the latest commit or rebuild.
    pub fn previous(&self) -> &Grid {
        &self.staging
    }

    /// Flip one cell of the published grid in place. Edits are not
    /// generations, so the previous buffer is left alone.
    pub fn toggle(&mut self, coord: Coord) -> Result<Cell, GridError> {
        self.published.toggle(coord)
    }

    /// Publish the next generation as the current one plus `births` and
    /// minus `deaths`.
    ///
    /// All coordinates are validated before anything is written; on error
    /// the published grid is untouched.
    pub fn commit(&mut self, births: &[Coord], deaths: &[Coord]) -> Result<(), GridError> {
        for &coord in births.iter().chain(deaths) {
            self.published.get(coord)?;
        }
        self.staging.copy_from(&self.published);
        for &coord in births {
            self.staging.set(coord, Cell::Alive)?;
        }
        for &coord in deaths {
            self.staging.set(coord, Cell::Dead)?;
        }
        std::mem::swap(&mut self.published, &mut self.staging);
        Ok(())
    }

    /// Publish a grid rebuilt from scratch with exactly `alive` set.
    pub fn rebuild<I>(&mut self, alive: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = Coord>,
    {
        self.staging.clear();
        for coord in alive {
            self.staging.set(coord, Cell::Alive)?;
        }
        std::mem::swap(&mut self.published, &mut self.staging);
        Ok(())
    }

    /// Cells whose state differs between the current and previous grids.
    pub fn changed_cells(&self) -> Vec<Coord> {
        self.published.diff(&self.staging)
    }

    /// Kill every cell in both buffers.
    pub fn reset(&mut self) {
        self.published.clear();
        self.staging.clear();
    }
}
