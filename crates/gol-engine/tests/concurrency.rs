//! Background stepper: alternation, cancellation, timeouts and autoplay.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use gol_core::{Coord, Generation};
use gol_engine::{EngineConfig, LifeEngine, StepEvent, Stepper, StepperConfig, StepperError};
use gol_test_utils::{blinker_horizontal, glider};

const WAIT: Duration = Duration::from_secs(5);

fn c(x: usize, y: usize) -> Coord {
    Coord::new(x, y)
}

fn engine_with(cells: &[Coord]) -> Arc<LifeEngine> {
    let engine = LifeEngine::new(EngineConfig {
        width: 32,
        height: 32,
        history_depth: 64,
    })
    .unwrap();
    for &cell in cells {
        engine.toggle(cell).unwrap();
    }
    engine.start();
    Arc::new(engine)
}

fn fast() -> StepperConfig {
    StepperConfig {
        lock_timeout: Duration::from_millis(50),
        tick_interval: Duration::from_millis(2),
    }
}

fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}

#[test]
fn each_signal_commits_exactly_one_generation() {
    let stepper = Stepper::new(engine_with(&blinker_horizontal(c(8, 8))), fast()).unwrap();
    for expected in 1..=10u64 {
        stepper.request_next_step().unwrap();
        match stepper.wait_event(WAIT) {
            Some(StepEvent::Committed(report)) => {
                assert_eq!(report.generation, Generation(expected));
            }
            other => panic!("expected commit {expected}, got {other:?}"),
        }
        // Consumer is free to read the committed result.
        assert_eq!(stepper.engine().generation(), Generation(expected));
        assert_eq!(stepper.engine().population(), 3);
    }
    assert!(stepper.try_next_event().is_none());
}

#[test]
fn pending_requests_coalesce() {
    let stepper = Stepper::new(engine_with(&blinker_horizontal(c(8, 8))), fast()).unwrap();
    {
        // Hold the lock so the worker cannot drain the signal channel.
        let _guard = stepper.engine().lock();
        for _ in 0..20 {
            stepper.request_next_step().unwrap();
        }
    }
    assert!(wait_until(|| stepper.engine().generation() >= Generation(1)));
    thread::sleep(Duration::from_millis(100));
    // One in flight plus at most one pending.
    assert!(stepper.engine().generation() <= Generation(2));
}

#[test]
fn busy_lock_skips_the_tick() {
    let config = StepperConfig {
        lock_timeout: Duration::from_millis(20),
        ..fast()
    };
    let stepper = Stepper::new(engine_with(&blinker_horizontal(c(8, 8))), config).unwrap();
    let guard = stepper.engine().lock();
    stepper.request_next_step().unwrap();
    match stepper.wait_event(WAIT) {
        Some(StepEvent::Skipped { waited }) => assert!(waited >= Duration::from_millis(20)),
        other => panic!("expected skipped tick, got {other:?}"),
    }
    assert_eq!(guard.generation(), Generation(0));
    drop(guard);

    // The worker survives a skipped tick.
    assert!(stepper.is_active());
    stepper.request_next_step().unwrap();
    assert!(matches!(
        stepper.wait_event(WAIT),
        Some(StepEvent::Committed(_))
    ));
}

#[test]
fn worker_cancels_itself_on_extinction() {
    let stepper = Stepper::new(engine_with(&[c(4, 4)]), fast()).unwrap();
    stepper.request_next_step().unwrap();
    match stepper.wait_event(WAIT) {
        Some(StepEvent::Committed(report)) => assert!(report.extinct),
        other => panic!("expected final commit, got {other:?}"),
    }
    assert_eq!(
        stepper.wait_event(WAIT),
        Some(StepEvent::Extinct {
            generation: Generation(1)
        })
    );
    assert!(!stepper.is_active());
    assert_eq!(stepper.request_next_step(), Err(StepperError::Stopped));
    // The run flag survives extinction; only reset clears it.
    assert!(stepper.engine().is_running());
}

#[test]
fn cancel_then_resume() {
    let mut stepper = Stepper::new(engine_with(&glider(c(4, 4))), fast()).unwrap();
    stepper.cancel();
    assert!(!stepper.is_active());

    // Manual stepping still works while the worker is cancelled.
    stepper.engine().step().unwrap();
    assert_eq!(stepper.engine().generation(), Generation(1));

    stepper.resume().unwrap();
    stepper.request_next_step().unwrap();
    match stepper.wait_event(WAIT) {
        Some(StepEvent::Committed(report)) => assert_eq!(report.generation, Generation(2)),
        other => panic!("expected commit, got {other:?}"),
    }
}

#[test]
fn cancel_waits_for_in_flight_step() {
    let mut stepper = Stepper::new(engine_with(&glider(c(4, 4))), fast()).unwrap();
    stepper.request_next_step().unwrap();
    stepper.cancel();
    let generation = stepper.engine().generation();
    assert!(generation <= Generation(1));
    thread::sleep(Duration::from_millis(20));
    assert_eq!(stepper.engine().generation(), generation);
}

#[test]
fn autoplay_advances_until_paused() {
    let mut stepper = Stepper::new(engine_with(&blinker_horizontal(c(8, 8))), fast()).unwrap();
    stepper.start_autoplay().unwrap();
    assert!(stepper.is_autoplaying());
    assert!(wait_until(|| stepper.engine().generation() >= Generation(5)));

    stepper.pause();
    assert!(!stepper.is_autoplaying());
    assert!(!stepper.is_active());
    let paused_at = stepper.engine().generation();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(stepper.engine().generation(), paused_at);

    // Committed generations arrive strictly in order.
    let mut last = Generation(0);
    while let Some(event) = stepper.try_next_event() {
        if let StepEvent::Committed(report) = event {
            assert!(report.generation > last);
            last = report.generation;
        }
    }
    assert!(last > Generation(0));
}

#[test]
fn autoplay_stops_on_extinction() {
    let mut stepper = Stepper::new(engine_with(&[c(3, 3), c(20, 20)]), fast()).unwrap();
    stepper.start_autoplay().unwrap();
    assert!(wait_until(|| !stepper.is_autoplaying()));
    assert_eq!(stepper.engine().generation(), Generation(1));
    assert!(!stepper.is_active());
}

#[test]
fn reset_engine_pauses_first() {
    let mut stepper = Stepper::new(engine_with(&blinker_horizontal(c(8, 8))), fast()).unwrap();
    stepper.start_autoplay().unwrap();
    assert!(wait_until(|| stepper.engine().generation() >= Generation(2)));

    stepper.reset_engine();
    assert!(!stepper.is_active());
    let view = stepper.engine().view();
    assert_eq!(view.generation, Generation(0));
    assert_eq!(view.population, 0);
    assert!(!view.running);
}

#[test]
fn foreground_edits_interleave_with_autoplay() {
    let mut stepper = Stepper::new(engine_with(&blinker_horizontal(c(8, 8))), fast()).unwrap();
    stepper.start_autoplay().unwrap();

    let engine = Arc::clone(stepper.engine());
    let editor = thread::spawn(move || {
        for i in 0..200usize {
            let coord = Coord::new(16 + i % 10, 16 + (i / 10) % 10);
            engine.toggle(coord).unwrap();
            assert!(engine.with_world(|w| w.is_consistent()));
        }
    });
    editor.join().unwrap();
    stepper.pause();
    assert!(stepper.engine().with_world(|w| w.is_consistent()));
}
