//! Standard still lifes, oscillators and spaceships.
//!
//! Each function returns absolute coordinates. Callers must place the
//! pattern far enough from the border (at least one cell of margin) for
//! it to evolve as it would on an unbounded plane.

use gol_core::Coord;

fn offset(origin: Coord, cells: &[(usize, usize)]) -> Vec<Coord> {
    cells
        .iter()
        .map(|&(dx, dy)| Coord::new(origin.x + dx, origin.y + dy))
        .collect()
}

/// Period-2 oscillator, three cells in a row centred on `center`.
pub fn blinker_horizontal(center: Coord) -> Vec<Coord> {
    vec![
        Coord::new(center.x - 1, center.y),
        center,
        Coord::new(center.x + 1, center.y),
    ]
}

/// The other phase of [`blinker_horizontal`].
pub fn blinker_vertical(center: Coord) -> Vec<Coord> {
    vec![
        Coord::new(center.x, center.y - 1),
        center,
        Coord::new(center.x, center.y + 1),
    ]
}

/// 2×2 still life with its top-left cell at `origin`.
pub fn block(origin: Coord) -> Vec<Coord> {
    offset(origin, &[(0, 0), (1, 0), (0, 1), (1, 1)])
}

/// Six-cell still life inside a 4×3 box at `origin`.
pub fn beehive(origin: Coord) -> Vec<Coord> {
    offset(origin, &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)])
}

/// Period-2 oscillator inside a 4×2 box at `origin`.
pub fn toad(origin: Coord) -> Vec<Coord> {
    offset(origin, &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)])
}

/// South-east travelling glider inside a 3×3 box at `origin`.
///
/// After four generations the same shape reappears shifted by (+1, +1).
pub fn glider(origin: Coord) -> Vec<Coord> {
    offset(origin, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)])
}
