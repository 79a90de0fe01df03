//! Real-time pacing wrapper.
//!
//! Translates wall-clock time into integer tick advances at a configurable
//! speed. Commodity timers floor at roughly 4-15ms of sleep granularity, so
//! a single pacing iteration must be ready to push an arbitrary batch of
//! ticks through the scheduler; the fractional remainder carries over so
//! the average rate converges on `speed * 1000` ticks per wall second.
//!
//! The loop itself is strictly iterative and runs on whichever thread calls
//! `run()`. Control (pause/resume/stop/speed) goes through a cloneable
//! handle that is safe to use from other threads; the simulation itself
//! never migrates.

use std::sync::atomic::{AtomicU64, Ordering as MemOrdering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use super::{Drivable, Tick};
use crate::error::{Result, SimError};

/// Default wait between pacing iterations, in wall-clock milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 4;

/// Reference calibration range for the speed multiplier. Values outside
/// this range still work; these are the bounds the pacing was tuned for.
pub const SPEED_CALIBRATED_MIN: f64 = 0.1;
pub const SPEED_CALIBRATED_MAX: f64 = 1200.0;

/// Lifecycle of the pacing loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    /// Pause requested; the in-flight drain has not finished yet.
    Pausing,
    Paused,
    Stopped,
    /// The simulation aborted; pause guards resolve as errors.
    Failed,
}

struct Shared {
    state: Mutex<RunnerState>,
    signal: Condvar,
    /// Speed multiplier stored as f64 bits so the loop can read it without
    /// taking the state lock.
    speed_bits: AtomicU64,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, RunnerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Paces one simulation against wall time.
pub struct RealtimeRunner<S> {
    sim: S,
    shared: Arc<Shared>,
    frame_delay: Duration,
    accumulator: f64,
}

/// Cloneable control surface for a running pacing loop.
#[derive(Clone)]
pub struct RealtimeHandle {
    shared: Arc<Shared>,
}

/// One-shot completion handle returned by `pause()`. Resolves once the
/// in-flight pacing iteration has finished; after that, no event fires
/// until `resume()`.
pub struct PauseGuard {
    shared: Arc<Shared>,
}

impl<S: Drivable> RealtimeRunner<S> {
    pub fn new(sim: S) -> Self {
        Self::with_pacing(sim, 1.0, DEFAULT_FRAME_DELAY_MS)
    }

    pub fn with_pacing(sim: S, speed: f64, frame_delay_ms: u64) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(RunnerState::Idle),
            signal: Condvar::new(),
            speed_bits: AtomicU64::new(sanitize_speed(speed, 1.0).to_bits()),
        });
        Self {
            sim,
            shared,
            frame_delay: Duration::from_millis(frame_delay_ms),
            accumulator: 0.0,
        }
    }

    pub fn handle(&self) -> RealtimeHandle {
        RealtimeHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Give up the wrapper and recover the simulation, e.g. to hand a
    /// half-played match to the headless runner. Wrapper state (speed,
    /// accumulator, lifecycle) is discarded; scheduler state is not.
    pub fn into_inner(self) -> S {
        self.sim
    }

    #[inline]
    fn speed(&self) -> f64 {
        f64::from_bits(self.shared.speed_bits.load(MemOrdering::Relaxed))
    }

    /// The pacing loop. Returns when stopped, when the simulation drains
    /// dry, or when a drain fails.
    pub fn run(&mut self) -> Result<()> {
        {
            let mut state = self.shared.lock_state();
            match *state {
                RunnerState::Idle => *state = RunnerState::Running,
                RunnerState::Stopped | RunnerState::Failed => {
                    return Err(SimError::RunnerStopped)
                }
                // `run` takes `&mut self`, so these are unreachable from
                // safe code; treat them as already running.
                RunnerState::Running | RunnerState::Pausing | RunnerState::Paused => {}
            }
        }

        let mut t0 = Instant::now();
        loop {
            thread::sleep(self.frame_delay);

            let now = Instant::now();
            let elapsed_ms = now.duration_since(t0).as_secs_f64() * 1000.0;
            t0 = now;

            let pending = self.accumulator + elapsed_ms * self.speed();
            let ticks = pending.floor();
            self.accumulator = pending - ticks;

            if ticks >= 1.0 {
                let target = self
                    .sim
                    .current_tick()
                    .saturating_add(ticks.min(Tick::MAX as f64) as Tick);
                if let Err(err) = self.sim.advance_to(target) {
                    let mut state = self.shared.lock_state();
                    *state = RunnerState::Failed;
                    self.shared.signal.notify_all();
                    return Err(err);
                }
            }

            // Honor control requests only between drains, so a pause guard
            // never resolves while an event callback is still executing.
            let mut paused = false;
            {
                let mut state = self.shared.lock_state();
                loop {
                    match *state {
                        RunnerState::Pausing => {
                            *state = RunnerState::Paused;
                            self.shared.signal.notify_all();
                        }
                        RunnerState::Paused => {
                            paused = true;
                            state = self
                                .shared
                                .signal
                                .wait(state)
                                .unwrap_or_else(|poisoned| poisoned.into_inner());
                        }
                        RunnerState::Stopped => return Ok(()),
                        _ => break,
                    }
                }
            }
            if paused {
                // Wall time spent paused must not be replayed as catch-up.
                t0 = Instant::now();
            }

            if self.sim.is_idle() {
                let mut state = self.shared.lock_state();
                *state = RunnerState::Stopped;
                self.shared.signal.notify_all();
                return Ok(());
            }
        }
    }
}

impl<S: Drivable + Send + 'static> RealtimeRunner<S> {
    /// Run the pacing loop on a background thread. The runner (and the
    /// simulation inside it) comes back through the join handle.
    pub fn spawn(mut self) -> (thread::JoinHandle<(Self, Result<()>)>, RealtimeHandle) {
        let handle = self.handle();
        let join = thread::spawn(move || {
            let outcome = self.run();
            (self, outcome)
        });
        (join, handle)
    }
}

impl RealtimeHandle {
    /// Request a pause. The returned guard resolves once the in-flight
    /// pacing iteration (if any) has completed; if nothing is running it
    /// resolves immediately. Pausing an already-paused runner is a no-op.
    pub fn pause(&self) -> PauseGuard {
        {
            let mut state = self.shared.lock_state();
            if *state == RunnerState::Running {
                *state = RunnerState::Pausing;
            }
        }
        PauseGuard {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn resume(&self) {
        let mut state = self.shared.lock_state();
        if matches!(*state, RunnerState::Pausing | RunnerState::Paused) {
            *state = RunnerState::Running;
            self.shared.signal.notify_all();
        }
    }

    /// Stop the loop. Wrapper state is discarded; the underlying scheduler
    /// keeps its queue and can be driven by another wrapper.
    pub fn stop(&self) {
        let mut state = self.shared.lock_state();
        if *state != RunnerState::Failed {
            *state = RunnerState::Stopped;
        }
        self.shared.signal.notify_all();
    }

    /// Change the speed multiplier. Non-finite or negative values are
    /// ignored (logged), everything else takes effect on the next pacing
    /// iteration.
    pub fn set_speed(&self, multiplier: f64) {
        if !multiplier.is_finite() || multiplier < 0.0 {
            log::warn!("ignoring invalid speed multiplier {}", multiplier);
            return;
        }
        self.shared
            .speed_bits
            .store(multiplier.to_bits(), MemOrdering::Relaxed);
    }

    pub fn state(&self) -> RunnerState {
        *self.shared.lock_state()
    }
}

impl PauseGuard {
    /// Block until the pause has taken effect (or the runner stopped on its
    /// own). Errors if the simulation failed instead of pausing.
    pub fn wait(&self) -> Result<()> {
        let mut state = self.shared.lock_state();
        while *state == RunnerState::Pausing {
            state = self
                .shared
                .signal
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        match *state {
            RunnerState::Failed => Err(SimError::RunnerStopped),
            _ => Ok(()),
        }
    }
}

#[inline]
fn sanitize_speed(speed: f64, fallback: f64) -> f64 {
    if speed.is_finite() && speed >= 0.0 {
        speed
    } else {
        fallback
    }
}
