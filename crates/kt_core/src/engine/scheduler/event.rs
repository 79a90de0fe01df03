//! Event payloads and handles for the tick scheduler.
//!
//! Events carry plain copyable data instead of closures; the match engine
//! dispatches them through a single step function. The enum discriminant
//! doubles as the firing priority within a tick (lower fires first).

use serde::{Deserialize, Serialize};

use super::{SchedulerId, Tick};
use crate::engine::player::PlayerId;
use crate::engine::team::TeamSide;

/// Referee-driven match flow signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefereeSignal {
    /// Place the ball on the centre spot and open play.
    Kickoff,
    /// End of the first period.
    HalfTime,
    /// Final whistle; chains stop re-arming after this fires.
    FullTime,
    /// Restart from the centre spot after a goal; `side` kicks off.
    GoalRestart { side: TeamSide },
}

/// Scheduled event payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// One ball integration step.
    BallPhysics,
    /// One motion integration step for a single player.
    PlayerPhysics { player: PlayerId },
    /// One deliberation pass for a single player.
    PlayerAi { player: PlayerId },
    /// Match flow control (kickoff, half-time, full-time, restarts).
    Referee { signal: RefereeSignal },
    /// Test/diagnostic probe; recorded by the engine, no gameplay effect.
    Debug { probe: u32 },
}

impl EventKind {
    /// Firing priority within a tick. Lower fires first.
    #[inline]
    pub(crate) fn ordinal(&self) -> u8 {
        match self {
            EventKind::BallPhysics => 0,
            EventKind::PlayerPhysics { .. } => 1,
            EventKind::PlayerAi { .. } => 2,
            EventKind::Referee { .. } => 3,
            EventKind::Debug { .. } => 4,
        }
    }

    /// Human-readable label for error context and logging.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::BallPhysics => "ball physics",
            EventKind::PlayerPhysics { .. } => "player physics",
            EventKind::PlayerAi { .. } => "player AI",
            EventKind::Referee { .. } => "referee",
            EventKind::Debug { .. } => "debug",
        }
    }
}

/// A fired event, as handed to the drain callback.
#[derive(Clone, Copy, Debug)]
pub struct Event {
    pub tick: Tick,
    pub kind: EventKind,
    pub(crate) seq: u64,
}

impl Event {
    /// Insertion sequence; ties within the same (tick, priority) fire in
    /// insertion order.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Handle to an event that is scheduled but has not fired yet.
///
/// Handles are bound to the scheduler that issued them; using one on
/// another scheduler is a fatal error.
#[derive(Clone, Copy, Debug)]
pub struct EventHandle {
    pub(crate) owner: SchedulerId,
    pub(crate) seq: u64,
    pub(crate) tick: Tick,
    pub(crate) kind: EventKind,
}

impl EventHandle {
    /// Tick the event is currently scheduled for.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}
