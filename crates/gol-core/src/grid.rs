//! Fixed-size two-dimensional cell buffer.

use std::fmt;

use smallvec::SmallVec;

use crate::cell::Cell;
use crate::error::GridError;
use crate::id::Coord;

/// All 8 offsets of the Moore neighbourhood: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(isize, isize); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// A `width x height` grid of [`Cell`]s stored row-major.
///
/// Dimensions are fixed at construction. Cells outside the grid do not
/// exist: there is no wrap-around, and border cells simply have fewer
/// in-grid neighbours.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// Returns `Err(GridError::EmptyGrid)` if either dimension is zero and
    /// `Err(GridError::DimensionTooLarge)` if the cell count overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or(GridError::DimensionTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Build a grid with exactly the given cells alive.
    pub fn from_alive<I>(width: usize, height: usize, alive: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut grid = Self::new(width, height)?;
        for coord in alive {
            grid.set(coord, Cell::Alive)?;
        }
        Ok(grid)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `coord` addresses a cell of this grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Whether `coord` has a complete 3x3 neighbourhood inside the grid.
    pub fn is_interior(&self, coord: Coord) -> bool {
        coord.x >= 1 && coord.y >= 1 && coord.x + 1 < self.width && coord.y + 1 < self.height
    }

    fn index_of(&self, coord: Coord) -> Result<usize, GridError> {
        if self.contains(coord) {
            Ok(coord.y * self.width + coord.x)
        } else {
            Err(GridError::OutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Read one cell.
    pub fn get(&self, coord: Coord) -> Result<Cell, GridError> {
        self.index_of(coord).map(|i| self.cells[i])
    }

    /// Write one cell, returning its previous state.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<Cell, GridError> {
        let i = self.index_of(coord)?;
        Ok(std::mem::replace(&mut self.cells[i], cell))
    }

    /// Flip one cell, returning its new state.
    pub fn toggle(&mut self, coord: Coord) -> Result<Cell, GridError> {
        let i = self.index_of(coord)?;
        let next = self.cells[i].toggled();
        self.cells[i] = next;
        Ok(next)
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Overwrite this grid with `other`'s contents.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn copy_from(&mut self, other: &Grid) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "grid dimensions must match"
        );
        self.cells.copy_from_slice(&other.cells);
    }

    /// Sum of the 3x3 neighbourhood of `coord`, excluding the cell itself.
    ///
    /// Only interior cells have a defined neighbourhood; border cells
    /// return `Err(GridError::BorderCell)`.
    pub fn live_neighbours(&self, coord: Coord) -> Result<u8, GridError> {
        self.index_of(coord)?;
        if !self.is_interior(coord) {
            return Err(GridError::BorderCell { coord });
        }
        let w = self.width;
        let above = (coord.y - 1) * w + coord.x;
        let row = coord.y * w + coord.x;
        let below = (coord.y + 1) * w + coord.x;
        let sum = self.cells[above - 1..=above + 1]
            .iter()
            .chain(&self.cells[below - 1..=below + 1])
            .map(|c| c.as_u8())
            .sum::<u8>()
            + self.cells[row - 1].as_u8()
            + self.cells[row + 1].as_u8();
        Ok(sum)
    }

    /// In-grid Moore neighbours of `coord`. Corners have 3, edges 5.
    pub fn neighbours(&self, coord: Coord) -> SmallVec<[Coord; 8]> {
        OFFSETS_8
            .iter()
            .filter_map(|&(dx, dy)| {
                let x = coord.x.checked_add_signed(dx)?;
                let y = coord.y.checked_add_signed(dy)?;
                let n = Coord::new(x, y);
                self.contains(n).then_some(n)
            })
            .collect()
    }

    /// Iterate over live cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| Coord::new(i % w, i / w))
    }

    /// Number of live cells, by full scan.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates whose state differs between `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn diff(&self, other: &Grid) -> Vec<Coord> {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "grid dimensions must match"
        );
        let w = self.width;
        self.cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| Coord::new(i % w, i / w))
            .collect()
    }

    /// Top-left corner of a `view_width x view_height` window centred in
    /// the grid. Views larger than the grid start at the origin.
    pub fn centered_origin(&self, view_width: usize, view_height: usize) -> Coord {
        Coord::new(
            self.width.saturating_sub(view_width) / 2,
            self.height.saturating_sub(view_height) / 2,
        )
    }

    /// Copy the window starting at `origin`, clamped to the grid.
    ///
    /// The returned grid is at most `width x height`; it is smaller when
    /// the window runs past the right or bottom edge.
    pub fn viewport(&self, origin: Coord, width: usize, height: usize) -> Result<Grid, GridError> {
        self.index_of(origin)?;
        let w = width.min(self.width - origin.x);
        let h = height.min(self.height - origin.y);
        let mut view = Grid::new(w, h)?;
        for row in 0..h {
            let src = (origin.y + row) * self.width + origin.x;
            view.cells[row * w..(row + 1) * w].copy_from_slice(&self.cells[src..src + w]);
        }
        Ok(view)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("population", &self.population())
            .finish()
    }
}

/// Renders `#` for live cells and `.` for dead ones, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                f.write_str(if cell.is_alive() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(x: usize, y: usize) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::EmptyGrid {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn new_rejects_overflow() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(GridError::DimensionTooLarge { .. })
        ));
    }

    #[test]
    fn get_out_of_bounds() {
        let g = Grid::new(4, 3).unwrap();
        assert!(g.get(c(3, 2)).is_ok());
        assert_eq!(
            g.get(c(4, 0)),
            Err(GridError::OutOfBounds {
                coord: c(4, 0),
                width: 4,
                height: 3
            })
        );
        assert!(g.get(c(0, 3)).is_err());
    }

    #[test]
    fn toggle_flips_and_returns_new_state() {
        let mut g = Grid::new(4, 4).unwrap();
        assert_eq!(g.toggle(c(1, 2)).unwrap(), Cell::Alive);
        assert_eq!(g.get(c(1, 2)).unwrap(), Cell::Alive);
        assert_eq!(g.toggle(c(1, 2)).unwrap(), Cell::Dead);
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn live_neighbours_counts_ring_only() {
        let g = Grid::from_alive(5, 5, [c(1, 1), c(2, 1), c(3, 1), c(2, 2)]).unwrap();
        // Centre cell is alive but excluded from its own count.
        assert_eq!(g.live_neighbours(c(2, 2)).unwrap(), 3);
        assert_eq!(g.live_neighbours(c(2, 3)).unwrap(), 1);
        assert_eq!(g.live_neighbours(c(1, 2)).unwrap(), 3);
    }

    #[test]
    fn live_neighbours_rejects_border() {
        let g = Grid::new(5, 5).unwrap();
        assert_eq!(
            g.live_neighbours(c(0, 2)),
            Err(GridError::BorderCell { coord: c(0, 2) })
        );
        assert_eq!(
            g.live_neighbours(c(2, 4)),
            Err(GridError::BorderCell { coord: c(2, 4) })
        );
        assert!(matches!(
            g.live_neighbours(c(9, 9)),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn neighbours_corner_and_edge() {
        let g = Grid::new(5, 5).unwrap();
        let n = g.neighbours(c(0, 0));
        assert_eq!(n.len(), 3);
        assert!(n.contains(&c(1, 1)));
        assert_eq!(g.neighbours(c(2, 0)).len(), 5);
        assert_eq!(g.neighbours(c(2, 2)).len(), 8);
    }

    #[test]
    fn alive_cells_row_major() {
        let g = Grid::from_alive(4, 4, [c(3, 0), c(0, 2), c(1, 0)]).unwrap();
        let cells: Vec<_> = g.alive_cells().collect();
        assert_eq!(cells, vec![c(1, 0), c(3, 0), c(0, 2)]);
    }

    #[test]
    fn diff_reports_changed_cells() {
        let a = Grid::from_alive(3, 3, [c(0, 0), c(1, 1)]).unwrap();
        let b = Grid::from_alive(3, 3, [c(1, 1), c(2, 2)]).unwrap();
        assert_eq!(a.diff(&b), vec![c(0, 0), c(2, 2)]);
        assert!(a.diff(&a).is_empty());
    }

    #[test]
    fn viewport_copies_window() {
        let g = Grid::from_alive(10, 10, [c(4, 4), c(5, 5), c(9, 9)]).unwrap();
        let v = g.viewport(c(4, 4), 3, 3).unwrap();
        assert_eq!((v.width(), v.height()), (3, 3));
        assert_eq!(v.alive_cells().collect::<Vec<_>>(), vec![c(0, 0), c(1, 1)]);

        // Clamped at the bottom-right edge.
        let v = g.viewport(c(8, 8), 5, 5).unwrap();
        assert_eq!((v.width(), v.height()), (2, 2));
        assert_eq!(v.get(c(1, 1)).unwrap(), Cell::Alive);
    }

    #[test]
    fn centered_origin_matches_half_offsets() {
        let g = Grid::new(500, 500).unwrap();
        assert_eq!(g.centered_origin(60, 35), c(220, 232));
        assert_eq!(g.centered_origin(600, 600), c(0, 0));
    }

    #[test]
    fn display_renders_rows() {
        let g = Grid::from_alive(3, 2, [c(1, 0), c(2, 1)]).unwrap();
        assert_eq!(g.to_string(), ".#.\n..#\n");
    }

    proptest! {
        #[test]
        fn live_neighbours_agrees_with_neighbour_list(
            w in 3usize..12,
            h in 3usize..12,
            seed in prop::collection::vec((0usize..12, 0usize..12), 0..40),
            px in 1usize..11,
            py in 1usize..11,
        ) {
            let alive: Vec<Coord> = seed
                .into_iter()
                .map(|(x, y)| c(x % w, y % h))
                .collect();
            let mut g = Grid::new(w, h).unwrap();
            for coord in alive {
                g.set(coord, Cell::Alive).unwrap();
            }
            let p = c(1 + px % (w - 2), 1 + py % (h - 2));
            let expected = g
                .neighbours(p)
                .into_iter()
                .filter(|n| g.get(*n).unwrap().is_alive())
                .count() as u8;
            prop_assert_eq!(g.live_neighbours(p).unwrap(), expected);
        }
    }
}
