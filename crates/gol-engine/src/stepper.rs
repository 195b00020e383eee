//! Background stepping role and autoplay pacer.
//!
//! The stepper owns one dedicated worker thread that blocks on a signal
//! channel, performs exactly one [`LifeEngine::try_step_for`] per signal,
//! and re-blocks. Cancellation is a flag checked only at the wake point, so
//! a step in flight always completes.
//!
//! ```text
//! Consumer / Pacer            Worker ("gol-stepper")         Consumer
//!     |                           |                             |
//!     |--request_next_step()----->| signal_rx.recv()            |
//!     |   [signal: bounded(1)]    | cancel? -> exit             |
//!     |                           | engine.try_step_for(t)      |
//!     |                           |   None -> Skipped (warn)    |
//!     |                           |   Ok   -> Committed         |
//!     |                           |   Extinct -> self-cancel    |
//!     |                           |--events: bounded(64)------->| try_next_event()
//! ```
//!
//! Signals coalesce: a request made while one is already pending is
//! absorbed, so stepping never runs away from the caller's cadence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use gol_core::{Generation, InvariantViolation, StepError};
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, StepperConfig};
use crate::engine::LifeEngine;
use crate::world::StepReport;

const EVENT_CAPACITY: usize = 64;

// ── Error types ──────────────────────────────────────────────────

/// Error controlling the background role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepperError {
    /// Invalid [`StepperConfig`].
    Config(ConfigError),
    /// The OS refused to spawn a worker or pacer thread.
    ThreadSpawnFailed {
        /// OS error text.
        reason: String,
    },
    /// The worker is cancelled; call [`Stepper::resume`] first.
    Stopped,
}

impl std::fmt::Display for StepperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "stepper config: {e}"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn stepper thread: {reason}")
            }
            Self::Stopped => write!(f, "background stepper is stopped"),
        }
    }
}

impl std::error::Error for StepperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for StepperError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── StepEvent ────────────────────────────────────────────────────

/// Notification published by the worker after each wake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A generation was committed; the consumer may read it.
    Committed(StepReport),
    /// The population is empty. The worker has cancelled itself.
    Extinct {
        /// Generation at which stepping stopped.
        generation: Generation,
    },
    /// The lock could not be acquired in time; the tick was abandoned.
    Skipped {
        /// How long the worker waited.
        waited: Duration,
    },
    /// An engine invariant was violated. The worker has exited.
    Failed(InvariantViolation),
}

// ── Worker ───────────────────────────────────────────────────────

struct Worker {
    engine: Arc<LifeEngine>,
    signal_rx: Receiver<()>,
    cancel: Arc<AtomicBool>,
    events: Sender<StepEvent>,
    lock_timeout: Duration,
}

impl Worker {
    fn run(self) {
        while self.signal_rx.recv().is_ok() {
            if self.cancel.load(Ordering::Acquire) {
                break;
            }

            let wait_start = Instant::now();
            match self.engine.try_step_for(self.lock_timeout) {
                None => {
                    let waited = wait_start.elapsed();
                    warn!(waited_ms = waited.as_millis() as u64, "lock busy, tick skipped");
                    self.publish(StepEvent::Skipped { waited });
                }
                Some(Ok(report)) => {
                    let extinct = report.extinct;
                    let generation = report.generation;
                    self.publish(StepEvent::Committed(report));
                    if extinct {
                        self.stop_extinct(generation);
                        break;
                    }
                }
                Some(Err(StepError::Extinct { generation })) => {
                    self.stop_extinct(generation);
                    break;
                }
                Some(Err(StepError::Invariant(v))) => {
                    error!(violation = %v, "stepper stopping on invariant violation");
                    self.cancel.store(true, Ordering::Release);
                    self.publish(StepEvent::Failed(v));
                    break;
                }
            }
        }
        debug!("stepper worker exited");
    }

    fn stop_extinct(&self, generation: Generation) {
        info!(generation = generation.0, "population extinct, stepper cancelled");
        self.cancel.store(true, Ordering::Release);
        self.publish(StepEvent::Extinct { generation });
    }

    // Best-effort: a consumer that stops polling must not stall the worker.
    fn publish(&self, event: StepEvent) {
        if let Err(TrySendError::Full(dropped)) = self.events.try_send(event) {
            debug!(?dropped, "event channel full, event dropped");
        }
    }
}

// ── Stepper ──────────────────────────────────────────────────────

/// Background stepping role over a shared [`LifeEngine`].
///
/// Dropping the stepper pauses it: the pacer and the worker are joined.
pub struct Stepper {
    engine: Arc<LifeEngine>,
    config: StepperConfig,
    signal_tx: Sender<()>,
    signal_rx: Receiver<()>,
    event_tx: Sender<StepEvent>,
    event_rx: Receiver<StepEvent>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    pacer_stop: Arc<AtomicBool>,
    pacer: Option<JoinHandle<()>>,
}

impl Stepper {
    /// Spawn the worker thread over `engine`.
    pub fn new(engine: Arc<LifeEngine>, config: StepperConfig) -> Result<Self, StepperError> {
        config.validate()?;
        let (signal_tx, signal_rx) = crossbeam_channel::bounded(1);
        let (event_tx, event_rx) = crossbeam_channel::bounded(EVENT_CAPACITY);
        let mut stepper = Self {
            engine,
            config,
            signal_tx,
            signal_rx,
            event_tx,
            event_rx,
            cancel: Arc::new(AtomicBool::new(false)),
            worker: None,
            pacer_stop: Arc::new(AtomicBool::new(false)),
            pacer: None,
        };
        stepper.spawn_worker()?;
        Ok(stepper)
    }

    fn spawn_worker(&mut self) -> Result<(), StepperError> {
        let worker = Worker {
            engine: Arc::clone(&self.engine),
            signal_rx: self.signal_rx.clone(),
            cancel: Arc::clone(&self.cancel),
            events: self.event_tx.clone(),
            lock_timeout: self.config.lock_timeout,
        };
        let handle = thread::Builder::new()
            .name("gol-stepper".into())
            .spawn(move || worker.run())
            .map_err(|e| StepperError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        self.worker = Some(handle);
        info!(
            lock_timeout_ms = self.config.lock_timeout.as_millis() as u64,
            "stepper worker spawned"
        );
        Ok(())
    }

    /// The shared engine.
    pub fn engine(&self) -> &Arc<LifeEngine> {
        &self.engine
    }

    /// Ask the worker for one step.
    ///
    /// Non-blocking. A request made while another is still pending is
    /// coalesced into it.
    pub fn request_next_step(&self) -> Result<(), StepperError> {
        if !self.is_active() {
            return Err(StepperError::Stopped);
        }
        match self.signal_tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => Ok(()),
            Err(TrySendError::Disconnected(())) => Err(StepperError::Stopped),
        }
    }

    /// Whether the worker is alive and not cancelled.
    pub fn is_active(&self) -> bool {
        !self.cancel.load(Ordering::Acquire)
            && self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// A step already in progress completes first; no further step starts.
    pub fn cancel(&mut self) {
        self.cancel.store(true, Ordering::Release);
        // Wake the worker if it is blocked on the signal channel.
        let _ = self.signal_tx.try_send(());
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                error!("stepper worker panicked");
            }
            info!("stepper cancelled");
        }
        // Discard the wake signal and any stale requests.
        while self.signal_rx.try_recv().is_ok() {}
    }

    /// Re-arm a cancelled worker. No-op if already active.
    pub fn resume(&mut self) -> Result<(), StepperError> {
        if self.is_active() {
            return Ok(());
        }
        self.cancel();
        self.cancel.store(false, Ordering::Release);
        self.spawn_worker()
    }

    // ── Events ───────────────────────────────────────────────────

    /// Receiver for worker notifications.
    pub fn events(&self) -> &Receiver<StepEvent> {
        &self.event_rx
    }

    /// Next pending notification, if any.
    pub fn try_next_event(&self) -> Option<StepEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next notification.
    pub fn wait_event(&self, timeout: Duration) -> Option<StepEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    // ── Autoplay ─────────────────────────────────────────────────

    /// Request a step every `tick_interval` until paused or extinct.
    pub fn start_autoplay(&mut self) -> Result<(), StepperError> {
        if self.is_autoplaying() {
            return Ok(());
        }
        self.stop_pacer();
        self.resume()?;

        self.pacer_stop.store(false, Ordering::Release);
        let stop = Arc::clone(&self.pacer_stop);
        let cancel = Arc::clone(&self.cancel);
        let signal = self.signal_tx.clone();
        let interval = self.config.tick_interval;
        let handle = thread::Builder::new()
            .name("gol-pacer".into())
            .spawn(move || {
                while !stop.load(Ordering::Acquire) && !cancel.load(Ordering::Acquire) {
                    let _ = signal.try_send(());
                    // park_timeout so stop_pacer()'s unpark wakes us at once.
                    thread::park_timeout(interval);
                }
            })
            .map_err(|e| StepperError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        self.pacer = Some(handle);
        info!(
            tick_interval_ms = interval.as_millis() as u64,
            "autoplay started"
        );
        Ok(())
    }

    /// Whether the pacer thread is running.
    pub fn is_autoplaying(&self) -> bool {
        self.pacer.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the pacer and cancel the worker.
    pub fn pause(&mut self) {
        self.stop_pacer();
        self.cancel();
    }

    fn stop_pacer(&mut self) {
        self.pacer_stop.store(true, Ordering::Release);
        if let Some(handle) = self.pacer.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                error!("autoplay pacer panicked");
            }
        }
    }

    /// Pause the background role, then reset the shared engine.
    pub fn reset_engine(&mut self) {
        self.pause();
        self.engine.reset();
    }
}

impl Drop for Stepper {
    fn drop(&mut self) {
        self.pause();
    }
}

impl std::fmt::Debug for Stepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stepper")
            .field("active", &self.is_active())
            .field("autoplaying", &self.is_autoplaying())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use gol_core::Coord;
    use gol_test_utils::blinker_horizontal;

    fn blinker_engine() -> Arc<LifeEngine> {
        let engine = LifeEngine::new(EngineConfig {
            width: 12,
            height: 12,
            history_depth: 16,
        })
        .unwrap();
        for c in blinker_horizontal(Coord::new(5, 5)) {
            engine.toggle(c).unwrap();
        }
        engine.start();
        Arc::new(engine)
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = StepperConfig {
            lock_timeout: Duration::ZERO,
            ..StepperConfig::default()
        };
        let err = Stepper::new(blinker_engine(), cfg).unwrap_err();
        assert_eq!(err, StepperError::Config(ConfigError::LockTimeoutZero));
    }

    #[test]
    fn one_request_one_step() {
        let stepper = Stepper::new(blinker_engine(), StepperConfig::default()).unwrap();
        stepper.request_next_step().unwrap();
        match stepper.wait_event(Duration::from_secs(5)) {
            Some(StepEvent::Committed(r)) => assert_eq!(r.generation, Generation(1)),
            other => panic!("expected commit, got {other:?}"),
        }
        assert_eq!(stepper.engine().generation(), Generation(1));
    }

    #[test]
    fn cancelled_stepper_refuses_requests() {
        let mut stepper = Stepper::new(blinker_engine(), StepperConfig::default()).unwrap();
        stepper.cancel();
        assert!(!stepper.is_active());
        assert_eq!(stepper.request_next_step(), Err(StepperError::Stopped));

        stepper.resume().unwrap();
        assert!(stepper.is_active());
        stepper.request_next_step().unwrap();
        assert!(matches!(
            stepper.wait_event(Duration::from_secs(5)),
            Some(StepEvent::Committed(_))
        ));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            StepperError::Stopped.to_string(),
            "background stepper is stopped"
        );
        let e = StepperError::ThreadSpawnFailed {
            reason: "nope".into(),
        };
        assert!(e.to_string().contains("nope"));
    }
}
