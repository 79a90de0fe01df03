use std::fmt;

use crate::engine::scheduler::Tick;

/// Fatal simulation errors.
///
/// Everything here is a programmer error in the sense of the scheduler
/// contract: there is no recovery path and no retry. Callers propagate with
/// `?` and the simulation halts with the last coherent state intact.
#[derive(Debug)]
pub enum SimError {
    /// An event was scheduled at or before the scheduler's current tick.
    TickInPast {
        requested: Tick,
        current: Tick,
        kind: &'static str,
    },
    /// A handle from one scheduler instance was used on another.
    ForeignHandle { kind: &'static str },
    /// A handle refers to an event that already fired or was removed.
    HandleSpent { kind: &'static str },
    /// `run()` was called on a headless runner that is already running.
    ReEntrantRun,
    /// A stopped real-time runner was started again without reconstruction.
    RunnerStopped,
    /// An AI callback failed; the simulation aborts at the given tick.
    AiFailure {
        player: usize,
        tick: Tick,
        message: String,
    },
    /// A team roster does not hold the required number of players.
    InvalidTeamSize { expected: usize, found: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimError::TickInPast {
                requested,
                current,
                kind,
            } => {
                write!(
                    f,
                    "cannot schedule {} at tick {} (current tick is {})",
                    kind, requested, current
                )
            }
            SimError::ForeignHandle { kind } => {
                write!(f, "handle for {} belongs to another scheduler", kind)
            }
            SimError::HandleSpent { kind } => {
                write!(f, "handle for {} already fired or was removed", kind)
            }
            SimError::ReEntrantRun => {
                write!(f, "headless run() called while already running")
            }
            SimError::RunnerStopped => {
                write!(f, "real-time runner was stopped and cannot be restarted")
            }
            SimError::AiFailure {
                player,
                tick,
                message,
            } => {
                write!(f, "AI for player {} failed at tick {}: {}", player, tick, message)
            }
            SimError::InvalidTeamSize { expected, found } => {
                write!(f, "invalid team size: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for SimError {}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_in_past_message_cites_tick() {
        let err = SimError::TickInPast {
            requested: 3,
            current: 3,
            kind: "ball physics",
        };
        let msg = err.to_string();
        assert!(msg.contains("tick 3"), "message should cite the tick: {}", msg);
    }

    #[test]
    fn test_ai_failure_message() {
        let err = SimError::AiFailure {
            player: 7,
            tick: 1234,
            message: "no valid action".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("player 7"));
        assert!(msg.contains("1234"));
    }
}
