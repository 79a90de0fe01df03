//! Pitch geometry.
//!
//! Coordinates are in meters. The home team defends the goal line at
//! `x = 0` and attacks toward `x = length`; away is mirrored. The y axis
//! runs across the pitch, `0` at one touchline.

use serde::{Deserialize, Serialize};

use crate::engine::constants::field as dims;
use crate::engine::team::TeamSide;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Field {
    pub length_m: f32,
    pub width_m: f32,
    pub goal_width_m: f32,
    pub goal_height_m: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            length_m: dims::LENGTH_M,
            width_m: dims::WIDTH_M,
            goal_width_m: dims::GOAL_WIDTH_M,
            goal_height_m: dims::GOAL_HEIGHT_M,
        }
    }
}

impl Field {
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.length_m / 2.0, self.width_m / 2.0)
    }

    #[inline]
    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= 0.0 && point.0 <= self.length_m && point.1 >= 0.0 && point.1 <= self.width_m
    }

    /// Clamp a point onto the pitch.
    #[inline]
    pub fn clamp(&self, point: (f32, f32)) -> (f32, f32) {
        (
            point.0.clamp(0.0, self.length_m),
            point.1.clamp(0.0, self.width_m),
        )
    }

    /// X coordinate of the goal line `side` defends.
    #[inline]
    pub fn goal_line_x(&self, side: TeamSide) -> f32 {
        match side {
            TeamSide::Home => 0.0,
            TeamSide::Away => self.length_m,
        }
    }

    /// Centre of the goal mouth `side` defends.
    #[inline]
    pub fn goal_center(&self, side: TeamSide) -> (f32, f32) {
        (self.goal_line_x(side), self.width_m / 2.0)
    }

    /// Whether a crossing point on a goal line is between the posts and
    /// under the bar.
    #[inline]
    pub fn within_goal_mouth(&self, y: f32, height: f32) -> bool {
        let half = self.goal_width_m / 2.0;
        let center_y = self.width_m / 2.0;
        (y - center_y).abs() <= half && height <= self.goal_height_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let field = Field::default();
        assert_eq!(field.length_m, 105.0);
        assert_eq!(field.width_m, 68.0);
        assert_eq!(field.center(), (52.5, 34.0));
    }

    #[test]
    fn test_goal_lines_by_side() {
        let field = Field::default();
        assert_eq!(field.goal_line_x(TeamSide::Home), 0.0);
        assert_eq!(field.goal_line_x(TeamSide::Away), 105.0);
    }

    #[test]
    fn test_goal_mouth_bounds() {
        let field = Field::default();
        // Dead centre, on the ground.
        assert!(field.within_goal_mouth(34.0, 0.0));
        // Just inside a post.
        assert!(field.within_goal_mouth(34.0 + 3.6, 1.0));
        // Wide of the post.
        assert!(!field.within_goal_mouth(34.0 + 4.0, 1.0));
        // Over the bar.
        assert!(!field.within_goal_mouth(34.0, 2.5));
    }

    #[test]
    fn test_clamp_keeps_points_on_pitch() {
        let field = Field::default();
        assert_eq!(field.clamp((-5.0, 70.0)), (0.0, 68.0));
        assert!(field.contains(field.clamp((200.0, -3.0))));
    }
}
