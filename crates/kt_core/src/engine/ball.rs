//! Ball state.
//!
//! Kinematics only; integration lives in [`crate::engine::ball_physics`].
//! Position is in meters on the pitch plane, height above it. Sidespin is
//! a signed scalar: positive bends left of the travel direction.

use serde::{Deserialize, Serialize};

use crate::engine::constants::ball as params;
use crate::engine::scheduler::Tick;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Ball {
    pub position: (f32, f32),
    pub height: f32,
    pub velocity: (f32, f32),
    pub velocity_z: f32,
    pub spin: f32,
    /// Tick of the last integration step; the next step derives its dt
    /// from this.
    pub last_step_tick: Tick,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            position: (0.0, 0.0),
            height: 0.0,
            velocity: (0.0, 0.0),
            velocity_z: 0.0,
            spin: 0.0,
            last_step_tick: 0,
        }
    }
}

impl Ball {
    pub fn at(position: (f32, f32)) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Planar speed in m/s.
    #[inline]
    pub fn speed(&self) -> f32 {
        (self.velocity.0 * self.velocity.0 + self.velocity.1 * self.velocity.1).sqrt()
    }

    /// Whether the physics chain should keep running for this ball.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.speed() >= params::SLEEP_SPEED_MPS || self.is_airborne()
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.height > 0.0 || self.velocity_z > 0.0
    }

    /// Stop dead: zero velocity, spin, and vertical motion.
    pub fn halt(&mut self) {
        self.velocity = (0.0, 0.0);
        self.velocity_z = 0.0;
        self.spin = 0.0;
        self.height = 0.0;
    }

    /// Place the ball at rest on a spot (kickoffs, restarts).
    pub fn place(&mut self, position: (f32, f32), tick: Tick) {
        self.halt();
        self.position = position;
        self.last_step_tick = tick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_velocity_magnitude() {
        let mut ball = Ball::default();
        ball.velocity = (3.0, 4.0);
        assert!((ball.speed() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_stationary_ball_is_not_moving() {
        let ball = Ball::default();
        assert!(!ball.is_moving());
    }

    #[test]
    fn test_creeping_ball_below_threshold_is_not_moving() {
        let mut ball = Ball::default();
        ball.velocity = (0.0005, 0.0);
        assert!(!ball.is_moving());
    }

    #[test]
    fn test_airborne_ball_is_moving_even_without_planar_speed() {
        let mut ball = Ball::default();
        ball.height = 2.0;
        assert!(ball.is_moving());
    }

    #[test]
    fn test_place_resets_motion() {
        let mut ball = Ball::default();
        ball.velocity = (10.0, -4.0);
        ball.spin = 3.0;
        ball.height = 1.0;
        ball.place((52.5, 34.0), 777);
        assert_eq!(ball.position, (52.5, 34.0));
        assert_eq!(ball.speed(), 0.0);
        assert_eq!(ball.last_step_tick, 777);
    }
}
