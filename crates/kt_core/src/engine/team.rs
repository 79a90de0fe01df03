//! Teams, sides, and formation anchors.
//!
//! Tactics content is configuration, not behavior: the AI layer reads the
//! anchors and instruction knobs, nothing here makes decisions.

use serde::{Deserialize, Serialize};

use crate::engine::field::Field;
use crate::engine::player::PlayerId;

pub const SQUAD_SIZE: usize = 11;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    #[inline]
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Index into per-side arrays: home 0, away 1.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }

    /// Attack direction along the x axis: home plays toward +x.
    #[inline]
    pub fn attack_sign(&self) -> f32 {
        match self {
            TeamSide::Home => 1.0,
            TeamSide::Away => -1.0,
        }
    }
}

/// Formation shape in normalized own-half coordinates: x in `[0, 1]` from
/// own goal line toward the halfway line, y in `[0, 1]` across the pitch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub slots: Vec<(f32, f32)>,
}

impl Formation {
    /// Classic 4-4-2: keeper, back four, midfield four, two strikers.
    pub fn four_four_two() -> Self {
        Self {
            name: "4-4-2".to_string(),
            slots: vec![
                (0.06, 0.50), // GK
                (0.30, 0.18),
                (0.28, 0.39),
                (0.28, 0.61),
                (0.30, 0.82),
                (0.58, 0.18),
                (0.55, 0.39),
                (0.55, 0.61),
                (0.58, 0.82),
                (0.86, 0.38),
                (0.86, 0.62),
            ],
        }
    }

    /// Anchor in meters for a roster slot, mirrored for the away side.
    pub fn anchor_m(&self, slot: usize, side: TeamSide, field: &Field) -> (f32, f32) {
        let (nx, ny) = self
            .slots
            .get(slot)
            .copied()
            .unwrap_or((0.5, 0.5));
        // Own-half depth: 0 at own goal line, 1 at the halfway line.
        let depth = nx * 0.5 * field.length_m;
        let x = match side {
            TeamSide::Home => depth,
            TeamSide::Away => field.length_m - depth,
        };
        (x, ny * field.width_m)
    }
}

/// Opaque tactical knobs read by the AI layer, `[0, 1]` each.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TeamInstructions {
    /// How hard off-ball players are pulled toward the ball.
    pub pressing: f32,
    /// How far the block pushes up from its anchors.
    pub line_height: f32,
    /// Preference for early, longer passes.
    pub tempo: f32,
}

impl Default for TeamInstructions {
    fn default() -> Self {
        Self {
            pressing: 0.5,
            line_height: 0.5,
            tempo: 0.5,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub side: TeamSide,
    pub roster: Vec<PlayerId>,
    pub formation: Formation,
    pub instructions: TeamInstructions,
}

impl Team {
    pub fn new(name: impl Into<String>, side: TeamSide) -> Self {
        Self {
            name: name.into(),
            side,
            roster: Vec::new(),
            formation: Formation::four_four_two(),
            instructions: TeamInstructions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_mirror() {
        assert_eq!(TeamSide::Home.opponent(), TeamSide::Away);
        assert_eq!(TeamSide::Away.opponent(), TeamSide::Home);
        assert_eq!(TeamSide::Home.attack_sign(), 1.0);
        assert_eq!(TeamSide::Away.attack_sign(), -1.0);
    }

    #[test]
    fn test_formation_has_a_full_side() {
        assert_eq!(Formation::four_four_two().slots.len(), SQUAD_SIZE);
    }

    #[test]
    fn test_anchor_mirroring() {
        let field = Field::default();
        let formation = Formation::four_four_two();

        let home_gk = formation.anchor_m(0, TeamSide::Home, &field);
        let away_gk = formation.anchor_m(0, TeamSide::Away, &field);

        // Keepers sit near their own goal lines, mirrored around midfield.
        assert!(home_gk.0 < 10.0);
        assert!(away_gk.0 > 95.0);
        assert!((home_gk.0 - (field.length_m - away_gk.0)).abs() < 1e-4);
        assert_eq!(home_gk.1, away_gk.1);
    }

    #[test]
    fn test_anchors_stay_in_own_half() {
        let field = Field::default();
        let formation = Formation::four_four_two();
        for slot in 0..SQUAD_SIZE {
            let (x, y) = formation.anchor_m(slot, TeamSide::Home, &field);
            assert!(x <= field.length_m / 2.0, "slot {} anchored past midfield", slot);
            assert!(y >= 0.0 && y <= field.width_m);
        }
    }

    #[test]
    fn test_unknown_slot_falls_back_to_midfield() {
        let field = Field::default();
        let formation = Formation::four_four_two();
        let anchor = formation.anchor_m(99, TeamSide::Home, &field);
        assert_eq!(anchor, (field.length_m * 0.25, field.width_m * 0.5));
    }
}
