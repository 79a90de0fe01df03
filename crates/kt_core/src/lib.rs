//! # kt_core - Deterministic tick-scheduled football match simulation
//!
//! A closed world (field, two teams, a ball) advanced through discrete
//! 1-millisecond ticks. Every decision in the simulation - physics
//! integration, AI deliberation, referee actions - is an event scheduled on
//! a future tick; the scheduler is the only driver of time.
//!
//! ## Features
//! - Deterministic given a seed and a deterministic AI plug-in
//! - Event chains pick their own cadence: fast balls integrate at 5ms,
//!   idle players think every 200ms
//! - Real-time pacing with pause/resume and catch-up, or headless
//!   drain-to-completion from the same scheduler state

pub mod engine;
pub mod error;

pub use engine::{
    Drivable, HeadlessRunner, MatchClock, MatchEngine, MatchSnapshot, MatchWorld, PlayerBrain,
    RealtimeHandle, RealtimeRunner, RoleBrain, Scheduler, TeamSheet, Tick,
};
pub use error::{Result, SimError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
