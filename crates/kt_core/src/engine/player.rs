//! Player state: body, skills, context, and intentions.
//!
//! The AI layer writes intentions; the physics layer reads them. Nothing
//! else crosses that boundary, so the two chains can run on independent
//! cadences without coordination.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::scheduler::Tick;
use crate::engine::team::TeamSide;

/// Stable index into the match's player arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl PlayerId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Physical state integrated by the player physics chain.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlayerBody {
    pub position: (f32, f32),
    /// Unit vector the body faces.
    pub facing: (f32, f32),
    pub velocity: (f32, f32),
    pub last_step_tick: Tick,
}

impl PlayerBody {
    pub fn at(position: (f32, f32)) -> Self {
        Self {
            position,
            facing: (1.0, 0.0),
            velocity: (0.0, 0.0),
            last_step_tick: 0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        (self.velocity.0 * self.velocity.0 + self.velocity.1 * self.velocity.1).sqrt()
    }
}

/// Ability ratings on the 0-100 scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlayerSkills {
    pub pace: u8,
    pub acceleration: u8,
    pub agility: u8,
    pub balance: u8,
    pub technique: u8,
    /// Drives the AI cadence: alert players think more often.
    pub awareness: u8,
}

impl Default for PlayerSkills {
    fn default() -> Self {
        Self {
            pace: 60,
            acceleration: 60,
            agility: 60,
            balance: 60,
            technique: 60,
            awareness: 60,
        }
    }
}

impl PlayerSkills {
    /// Normalize an attribute to `[0, 1]`.
    #[inline]
    pub fn norm(value: u8) -> f32 {
        f32::from(value.min(100)) / 100.0
    }
}

/// Slow-changing per-player match context. Opaque to the scheduler.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlayerContext {
    pub side: TeamSide,
    /// Roster slot, 0-10.
    pub slot: usize,
    /// Formation anchor in meters.
    pub anchor: (f32, f32),
    /// Remaining stamina, `[0, 1]`.
    pub stamina: f32,
    pub last_think_tick: Tick,
}

/// Kick request written by the AI, consumed by the match engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KickIntent {
    /// Direction on the pitch plane; need not be normalized.
    pub direction: (f32, f32),
    /// Fraction of maximum kick speed, `[0, 1]`.
    pub power: f32,
    /// Fraction of maximum vertical launch, `[0, 1]`.
    pub lift: f32,
    /// Sidespin, `[-1, 1]`; positive bends left of travel.
    pub curve: f32,
}

/// What the player wants to do next. Written by AI, read by physics.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Intentions {
    pub target_position: Option<(f32, f32)>,
    pub face_target: Option<(f32, f32)>,
    pub kick: Option<KickIntent>,
}

impl Intentions {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub body: PlayerBody,
    pub skills: PlayerSkills,
    pub context: PlayerContext,
    pub intentions: Intentions,
}

impl Player {
    pub fn new(
        id: PlayerId,
        side: TeamSide,
        slot: usize,
        anchor: (f32, f32),
        skills: PlayerSkills,
    ) -> Self {
        Self {
            id,
            body: PlayerBody::at(anchor),
            skills,
            context: PlayerContext {
                side,
                slot,
                anchor,
                stamina: 1.0,
                last_think_tick: 0,
            },
            intentions: Intentions::default(),
        }
    }
}
