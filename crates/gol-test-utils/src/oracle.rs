//! Naive reference implementation of the transition rule.
//!
//! Scans every interior cell of the grid with no region tracking or
//! incremental state. Border cells keep whatever state they have.

use std::collections::BTreeSet;

use gol_core::{Coord, Grid};

/// Live cells of `grid` as an ordered set.
pub fn alive_set(grid: &Grid) -> BTreeSet<Coord> {
    grid.alive_cells().collect()
}

fn alive_at(grid: &Grid, x: usize, y: usize) -> bool {
    grid.get(Coord::new(x, y)).is_ok_and(|c| c.is_alive())
}

/// The live-cell set one generation after `grid`.
pub fn reference_step(grid: &Grid) -> BTreeSet<Coord> {
    let (w, h) = (grid.width(), grid.height());
    let mut next = BTreeSet::new();
    for y in 0..h {
        for x in 0..w {
            let alive = alive_at(grid, x, y);
            if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                if alive {
                    next.insert(Coord::new(x, y));
                }
                continue;
            }
            let mut n = 0;
            for ny in y - 1..=y + 1 {
                for nx in x - 1..=x + 1 {
                    if (nx, ny) != (x, y) && alive_at(grid, nx, ny) {
                        n += 1;
                    }
                }
            }
            if n == 3 || (alive && n == 2) {
                next.insert(Coord::new(x, y));
            }
        }
    }
    next
}

/// Live-cell sets for `generations` steps, starting with `grid` itself.
pub fn reference_run(grid: &Grid, generations: usize) -> Vec<BTreeSet<Coord>> {
    let mut out = Vec::with_capacity(generations + 1);
    let mut current = grid.clone();
    out.push(alive_set(&current));
    for _ in 0..generations {
        let next = reference_step(&current);
        current = Grid::from_alive(grid.width(), grid.height(), next.iter().copied())
            .unwrap_or_else(|e| panic!("reference grid: {e}"));
        out.push(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{blinker_horizontal, blinker_vertical, block};

    #[test]
    fn blinker_oscillates() {
        let g = Grid::from_alive(9, 9, blinker_horizontal(Coord::new(4, 4))).unwrap();
        let run = reference_run(&g, 2);
        assert_eq!(
            run[1],
            blinker_vertical(Coord::new(4, 4)).into_iter().collect()
        );
        assert_eq!(run[2], run[0]);
    }

    #[test]
    fn block_is_stable() {
        let g = Grid::from_alive(6, 6, block(Coord::new(2, 2))).unwrap();
        assert_eq!(reference_step(&g), alive_set(&g));
    }

    #[test]
    fn border_cells_keep_state() {
        let g = Grid::from_alive(5, 5, [Coord::new(0, 0)]).unwrap();
        assert_eq!(reference_step(&g), alive_set(&g));
    }
}
