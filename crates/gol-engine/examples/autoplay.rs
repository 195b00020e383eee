//! Game of Life autoplay: a background stepper driven by a pacer thread.
//!
//! Demonstrates:
//!   1. Building a shared `LifeEngine` and seeding a pattern with `toggle`
//!   2. Freezing generation 0 with `start`
//!   3. Running the background `Stepper` with autoplay
//!   4. Reading committed generations from the event channel
//!   5. Rewinding with `jump_by` and resetting
//!
//! Run with:
//!   RUST_LOG=gol_engine=debug cargo run -p gol-engine --example autoplay

use std::sync::Arc;
use std::time::{Duration, Instant};

use gol_core::Coord;
use gol_engine::{EngineConfig, LifeEngine, StepEvent, Stepper, StepperConfig};
use tracing_subscriber::EnvFilter;

// ─── View parameters ────────────────────────────────────────────

const VIEW_W: usize = 60;
const VIEW_H: usize = 35;
const RUN_FOR: Duration = Duration::from_secs(2);

/// R-pentomino: a small seed with a long, chaotic evolution.
fn r_pentomino(center: Coord) -> [Coord; 5] {
    let Coord { x, y } = center;
    [
        Coord::new(x, y - 1),
        Coord::new(x + 1, y - 1),
        Coord::new(x - 1, y),
        Coord::new(x, y),
        Coord::new(x, y + 1),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let engine = Arc::new(LifeEngine::new(EngineConfig::default())?);
    let origin = engine.with_world(|w| w.grid().centered_origin(VIEW_W, VIEW_H));
    let center = Coord::new(origin.x + VIEW_W / 2, origin.y + VIEW_H / 2);
    for cell in r_pentomino(center) {
        engine.toggle(cell)?;
    }
    engine.start();

    let mut stepper = Stepper::new(Arc::clone(&engine), StepperConfig::default())?;
    stepper.start_autoplay()?;

    let deadline = Instant::now() + RUN_FOR;
    let mut skipped = 0usize;
    while Instant::now() < deadline {
        match stepper.wait_event(Duration::from_millis(100)) {
            Some(StepEvent::Committed(report)) if report.generation.0 % 10 == 0 => {
                println!(
                    "gen {:>4}  population {:>4}  births {:>3}  deaths {:>3}  {} us",
                    report.generation.0,
                    report.population,
                    report.metrics.births,
                    report.metrics.deaths,
                    report.metrics.total_us,
                );
            }
            Some(StepEvent::Extinct { generation }) => {
                println!("extinct at generation {generation}");
                break;
            }
            Some(StepEvent::Skipped { .. }) => skipped += 1,
            Some(StepEvent::Failed(v)) => return Err(v.into()),
            _ => {}
        }
    }
    stepper.pause();

    let view = engine.view();
    println!(
        "paused at generation {} with {} live cells ({skipped} ticks skipped)",
        view.generation, view.population
    );
    println!("{}", view.grid.viewport(origin, VIEW_W, VIEW_H)?);

    let rewound = engine.jump_by(-10)?;
    println!("rewound to generation {}", rewound.generation);

    stepper.reset_engine();
    println!("reset: generation {}", engine.generation());
    Ok(())
}
