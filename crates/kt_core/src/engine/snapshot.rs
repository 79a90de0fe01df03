//! Viewer snapshots.
//!
//! A snapshot is a one-way copy of the render-relevant state: positions,
//! velocities, facings, and the score at a tick. Viewers interpolate
//! between reads and never call back into the simulation.

use serde::{Deserialize, Serialize};

use crate::engine::match_state::{MatchPhase, MatchWorld, Score};
use crate::engine::player::PlayerId;
use crate::engine::scheduler::Tick;
use crate::engine::team::TeamSide;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: (f32, f32),
    pub height: f32,
    pub velocity: (f32, f32),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub side: TeamSide,
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub facing: (f32, f32),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: Tick,
    pub phase: MatchPhase,
    pub score: Score,
    pub ball: BallSnapshot,
    pub players: Vec<PlayerSnapshot>,
}

impl MatchSnapshot {
    pub fn capture(world: &MatchWorld, tick: Tick) -> Self {
        Self {
            tick,
            phase: world.phase,
            score: world.score,
            ball: BallSnapshot {
                position: world.ball.position,
                height: world.ball.height,
                velocity: world.ball.velocity,
            },
            players: world
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    side: p.context.side,
                    position: p.body.position,
                    velocity: p.body.velocity,
                    facing: p.body.facing,
                })
                .collect(),
        }
    }
}
