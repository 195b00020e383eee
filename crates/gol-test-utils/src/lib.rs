//! Test fixtures for Game of Life development.
//!
//! Provides well-known patterns ([`blinker_horizontal`], [`block`],
//! [`glider`], ...) and [`reference_step`], a naive full-grid
//! implementation of the transition rule used as an oracle.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod oracle;
pub mod patterns;

pub use oracle::{alive_set, reference_run, reference_step};
pub use patterns::{beehive, blinker_horizontal, blinker_vertical, block, glider, toad};

use gol_core::{Coord, Grid};

/// Build a grid with `cells` alive, panicking on bad input.
pub fn grid_with(width: usize, height: usize, cells: &[Coord]) -> Grid {
    Grid::from_alive(width, height, cells.iter().copied())
        .unwrap_or_else(|e| panic!("fixture grid {width}x{height}: {e}"))
}
