//! The Game of Life rule, evaluated over the active region.
//!
//! Evaluation is pure: [`evaluate`] reads the current grid and returns
//! the full list of births and deaths without touching any state. The
//! engine applies that list to the grid, the alive index and the active
//! region in a second pass, so a transition is committed as a unit and
//! neighbour counts never observe next-generation values.

use gol_core::{Cell, Coord, Grid, GridError, RegionBounds};

/// Births and deaths for one generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Dead cells with exactly three live neighbours, in scan order.
    pub births: Vec<Coord>,
    /// Live cells with fewer than two or more than three live neighbours.
    pub deaths: Vec<Coord>,
    /// Number of cells evaluated.
    pub scanned: usize,
}

impl Transition {
    /// Whether the generation leaves the grid unchanged.
    pub fn is_still(&self) -> bool {
        self.births.is_empty() && self.deaths.is_empty()
    }
}

/// Next state of a cell with `live_neighbours` live neighbours.
pub fn next_state(cell: Cell, live_neighbours: u8) -> Cell {
    match (cell, live_neighbours) {
        (Cell::Dead, 3) => Cell::Alive,
        (Cell::Alive, 2 | 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

/// Evaluate the rule for every cell of `region` clamped to the grid interior.
///
/// Border cells are never evaluated. An `Err` means a cell outside the
/// interior was reached, which is an engine bug rather than bad input.
pub fn evaluate(grid: &Grid, region: &RegionBounds) -> Result<Transition, GridError> {
    let Some(rect) = region.interior(grid.width(), grid.height()) else {
        return Ok(Transition::default());
    };
    let mut out = Transition {
        scanned: rect.len(),
        ..Transition::default()
    };
    for coord in rect.coords() {
        let cell = grid.get(coord)?;
        let n = grid.live_neighbours(coord)?;
        match (cell, next_state(cell, n)) {
            (Cell::Dead, Cell::Alive) => out.births.push(coord),
            (Cell::Alive, Cell::Dead) => out.deaths.push(coord),
            _ => {}
        }
    }
    Ok(out)
}
