//! Simulation engine.
//!
//! The scheduler drives everything: ball physics, player physics, and
//! player AI are event chains that pick their own next interval; the match
//! engine owns the re-scheduling discipline and the world they mutate.

pub mod ball;
pub mod ball_physics;
pub mod brain;
pub mod cadence; // chain re-scheduling intervals
pub mod constants;
pub mod deterministic; // hash-based draws keyed by (seed, tick, actor, subcase)
pub mod event_log;
pub mod field;
pub mod match_engine;
pub mod match_state;
pub mod player;
pub mod player_physics;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod stats;
pub mod steering;
pub mod team;


pub use ball::Ball;
pub use brain::{MatchView, PlayerBrain, RoleBrain, Thought};
pub use event_log::{EventLog, LogEntry, LogLevel};
pub use field::Field;
pub use match_engine::{MatchClock, MatchEngine};
pub use match_state::{
    MatchEvent, MatchEventKind, MatchPhase, MatchWorld, Score, TeamSheet,
};
pub use player::{Intentions, KickIntent, Player, PlayerId, PlayerSkills};
pub use rng::MatchRng;
pub use scheduler::headless::HeadlessRunner;
pub use scheduler::realtime::{PauseGuard, RealtimeHandle, RealtimeRunner, RunnerState};
pub use scheduler::{
    Drivable, Event, EventHandle, EventKind, RefereeSignal, Scheduler, SchedulerId, Tick, TICK_MAX,
};
pub use snapshot::{BallSnapshot, MatchSnapshot, PlayerSnapshot};
pub use stats::{MatchStats, TeamStats};
pub use team::{Formation, Team, TeamInstructions, TeamSide, SQUAD_SIZE};
