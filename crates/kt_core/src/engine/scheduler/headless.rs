//! Headless wrapper: drain a simulation to completion with no pacing.
//!
//! No speed, no timer, no pause. Once started it executes on the calling
//! thread until the queue is dry. The only variation is an optional
//! cooperative yield between event batches to keep the host responsive;
//! the yield is strictly advisory and cannot change simulation outcomes.

use std::thread;

use super::Drivable;
use crate::error::{Result, SimError};

/// Drains one simulation to match end.
pub struct HeadlessRunner<S> {
    sim: S,
    running: bool,
    /// Yield to the host scheduler after this many event batches.
    yield_every: Option<u64>,
}

impl<S: Drivable> HeadlessRunner<S> {
    pub fn new(sim: S) -> Self {
        Self {
            sim,
            running: false,
            yield_every: None,
        }
    }

    /// Insert `thread::yield_now()` after every `batches` drained event
    /// batches.
    pub fn with_yield_every(mut self, batches: u64) -> Self {
        self.yield_every = Some(batches.max(1));
        self
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn into_inner(self) -> S {
        self.sim
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Drain to completion. Re-entry while running is a contract violation.
    pub fn run(&mut self) -> Result<()> {
        if self.running {
            return Err(SimError::ReEntrantRun);
        }
        self.running = true;
        let outcome = self.drain();
        self.running = false;
        outcome
    }

    fn drain(&mut self) -> Result<()> {
        match self.yield_every {
            None => self.sim.advance_to_end(),
            Some(batches) => {
                let mut since_yield = 0u64;
                while let Some(tick) = self.sim.next_event_tick() {
                    self.sim.advance_to(tick)?;
                    since_yield += 1;
                    if since_yield >= batches {
                        since_yield = 0;
                        thread::yield_now();
                    }
                }
                Ok(())
            }
        }
    }
}
