//! Benchmark profiles and utilities for the Game of Life engine.
//!
//! Provides pre-built [`EngineConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: 100x100 grid (10K cells)
//! - [`stress_profile`]: 500x500 grid (250K cells), the interactive default
//! - [`soup`]: deterministic random fill via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gol_core::Coord;
use gol_engine::{EngineConfig, LifeWorld};

/// Reference benchmark profile: 100x100 grid (10K cells), depth 64.
pub fn reference_profile() -> EngineConfig {
    EngineConfig {
        width: 100,
        height: 100,
        history_depth: 64,
    }
}

/// Stress benchmark profile: 500x500 grid (250K cells), depth 64.
pub fn stress_profile() -> EngineConfig {
    EngineConfig::default()
}

/// Deterministic random fill of the grid interior.
///
/// Each interior cell is alive with probability `density_percent / 100`,
/// decided by a linear congruential sequence seeded with `seed`.
pub fn soup(width: usize, height: usize, density_percent: u64, seed: u64) -> Vec<Coord> {
    let mut state = seed;
    let mut cells = Vec::new();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            if (state >> 33) % 100 < density_percent {
                cells.push(Coord::new(x, y));
            }
        }
    }
    cells
}

/// Build a started world from `config` with `cells` alive.
///
/// # Panics
///
/// If `config` is invalid or a cell lies outside the grid.
pub fn seeded_world(config: EngineConfig, cells: &[Coord]) -> LifeWorld {
    let mut world = LifeWorld::new(config).unwrap_or_else(|e| panic!("bench config: {e}"));
    for &cell in cells {
        world
            .toggle(cell)
            .unwrap_or_else(|e| panic!("bench seed {cell}: {e}"));
    }
    world.start();
    world
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        reference_profile().validate().unwrap();
        stress_profile().validate().unwrap();
    }

    #[test]
    fn soup_is_deterministic_and_interior() {
        let a = soup(50, 40, 30, 42);
        let b = soup(50, 40, 30, 42);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        assert!(a
            .iter()
            .all(|c| c.x >= 1 && c.x < 49 && c.y >= 1 && c.y < 39));
        assert_ne!(a, soup(50, 40, 30, 7));
    }

    #[test]
    fn soup_density_is_plausible() {
        let cells = soup(102, 102, 30, 1);
        let ratio = cells.len() as f64 / 10_000.0;
        assert!((0.2..0.4).contains(&ratio), "density {ratio}");
    }

    #[test]
    fn seeded_world_is_started() {
        let cfg = reference_profile();
        let cells = soup(cfg.width, cfg.height, 25, 3);
        let world = seeded_world(cfg, &cells);
        assert!(world.is_running());
        assert_eq!(world.population(), cells.len());
    }
}
