//! Ball integration.
//!
//! One step per `BallPhysics` event. The step length is whatever span the
//! cadence picked, so the integrator takes dt as an argument instead of
//! assuming a fixed timestep. Planar drag and rolling resistance slow the
//! ball, gravity pulls it down with a damped bounce, sidespin bends
//! airborne flight slightly.

use crate::engine::ball::Ball;
use crate::engine::constants::ball as params;
use crate::engine::field::Field;
use crate::engine::player::KickIntent;
use crate::engine::scheduler::Tick;
use crate::engine::steering::normalize;
use crate::engine::team::TeamSide;

/// What a single integration step observed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BallStepOutcome {
    /// The side that scored, when the ball fully crossed a goal line
    /// between the posts and under the bar.
    pub goal: Option<TeamSide>,
    /// The ball was played against a boundary line and reflected back.
    pub bounced_boundary: bool,
}

/// Advance the ball by `dt` seconds.
pub fn step(ball: &mut Ball, field: &Field, dt: f32) -> BallStepOutcome {
    let mut outcome = BallStepOutcome::default();
    let dt = dt.clamp(0.001, 0.25);

    apply_planar_drag(ball, dt);
    apply_gravity(ball, dt);

    let from = ball.position;
    let mut to = (
        from.0 + ball.velocity.0 * dt,
        from.1 + ball.velocity.1 * dt,
    );

    // Goal lines first: a crossing inside the mouth ends the step.
    if let Some(scorer) = check_goal(field, from, to, ball.height) {
        ball.position = to;
        outcome.goal = Some(scorer);
        return outcome;
    }

    // Otherwise keep the ball on the pitch with a damped reflection.
    if to.0 < 0.0 || to.0 > field.length_m {
        ball.velocity.0 = -ball.velocity.0 * params::BOUNDARY_DAMPING;
        ball.velocity.1 *= params::BOUNDARY_DAMPING;
        to.0 = to.0.clamp(0.0, field.length_m);
        outcome.bounced_boundary = true;
    }
    if to.1 < 0.0 || to.1 > field.width_m {
        ball.velocity.1 = -ball.velocity.1 * params::BOUNDARY_DAMPING;
        ball.velocity.0 *= params::BOUNDARY_DAMPING;
        to.1 = to.1.clamp(0.0, field.width_m);
        outcome.bounced_boundary = true;
    }

    ball.position = to;
    outcome
}

/// Accelerate the ball from a kick. The kicker is responsible for re-arming
/// the physics chain afterwards.
pub fn apply_kick(ball: &mut Ball, kick: &KickIntent, tick: Tick) {
    let dir = normalize(kick.direction);
    if dir == (0.0, 0.0) {
        return;
    }
    let speed = kick.power.clamp(0.0, 1.0) * params::MAX_KICK_SPEED_MPS;
    ball.velocity = (dir.0 * speed, dir.1 * speed);
    ball.velocity_z = kick.lift.clamp(0.0, 1.0) * params::MAX_KICK_VZ_MPS;
    ball.spin = kick.curve.clamp(-1.0, 1.0) * params::MAX_SPIN;
    ball.last_step_tick = tick;
}

fn apply_planar_drag(ball: &mut Ball, dt: f32) {
    let speed = ball.speed();
    if speed <= params::SLEEP_SPEED_MPS {
        ball.velocity = (0.0, 0.0);
        return;
    }
    let dir = (ball.velocity.0 / speed, ball.velocity.1 / speed);

    // Quadratic air drag plus rolling resistance on the ground.
    let drag_accel = 0.5 * params::DRAG_COEFFICIENT * speed * speed / params::MASS_KG;
    let rolling_accel = if ball.height <= 0.0 {
        params::ROLLING_RESISTANCE * params::GRAVITY
    } else {
        0.0
    };
    let new_speed = (speed - (drag_accel + rolling_accel) * dt).max(0.0);
    ball.velocity = (dir.0 * new_speed, dir.1 * new_speed);

    if ball.height > 0.0 && ball.spin.abs() > 1e-3 {
        // Sidespin bends flight: accelerate perpendicular to travel.
        let bend = ball.spin * params::SPIN_CURVE_ACCEL * new_speed * dt;
        ball.velocity.0 += -dir.1 * bend;
        ball.velocity.1 += dir.0 * bend;
    }
    ball.spin *= params::SPIN_DECAY.powf(dt);
}

fn apply_gravity(ball: &mut Ball, dt: f32) {
    if ball.height <= 0.0 && ball.velocity_z <= 0.0 {
        return;
    }
    ball.height += ball.velocity_z * dt;
    ball.velocity_z -= params::GRAVITY * dt;

    if ball.height <= 0.0 {
        ball.height = 0.0;
        if ball.velocity_z < 0.0 {
            let rebound = -ball.velocity_z * params::BOUNCE_RESTITUTION;
            ball.velocity_z = if rebound < params::BOUNCE_MIN_VZ_MPS {
                0.0
            } else {
                rebound
            };
        }
    }
}

/// Did the segment `from -> to` cross a goal line inside the mouth?
/// Returns the scoring side.
fn check_goal(field: &Field, from: (f32, f32), to: (f32, f32), height: f32) -> Option<TeamSide> {
    let crossing = if to.0 < 0.0 && from.0 >= 0.0 {
        // Home goal line: away attacks toward x = 0.
        Some((0.0, TeamSide::Away))
    } else if to.0 > field.length_m && from.0 <= field.length_m {
        Some((field.length_m, TeamSide::Home))
    } else {
        None
    };

    let (line_x, scorer) = crossing?;
    let span = to.0 - from.0;
    let t = if span.abs() < 1e-6 {
        0.0
    } else {
        (line_x - from.0) / span
    };
    let y = from.1 + (to.1 - from.1) * t;
    if field.within_goal_mouth(y, height) {
        Some(scorer)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolling_ball(position: (f32, f32), velocity: (f32, f32)) -> Ball {
        let mut ball = Ball::at(position);
        ball.velocity = velocity;
        ball
    }

    #[test]
    fn test_drag_slows_the_ball() {
        let mut ball = rolling_ball((50.0, 34.0), (10.0, 0.0));
        let field = Field::default();
        let before = ball.speed();
        step(&mut ball, &field, 0.02);
        assert!(ball.speed() < before);
        assert!(ball.position.0 > 50.0);
    }

    #[test]
    fn test_ball_eventually_settles() {
        let mut ball = rolling_ball((50.0, 34.0), (2.0, 0.0));
        let field = Field::default();
        for _ in 0..2_000 {
            step(&mut ball, &field, 0.02);
            if !ball.is_moving() {
                break;
            }
        }
        assert!(!ball.is_moving(), "ball never settled: {:?}", ball);
    }

    #[test]
    fn test_kick_sets_velocity_and_spin() {
        let mut ball = Ball::at((52.5, 34.0));
        let kick = KickIntent {
            direction: (1.0, 0.0),
            power: 1.0,
            lift: 0.5,
            curve: -0.5,
        };
        apply_kick(&mut ball, &kick, 123);
        assert!((ball.speed() - params::MAX_KICK_SPEED_MPS).abs() < 1e-4);
        assert!(ball.velocity_z > 0.0);
        assert!(ball.spin < 0.0);
        assert_eq!(ball.last_step_tick, 123);
    }

    #[test]
    fn test_zero_direction_kick_is_a_no_op() {
        let mut ball = Ball::at((52.5, 34.0));
        let kick = KickIntent {
            direction: (0.0, 0.0),
            power: 1.0,
            lift: 0.0,
            curve: 0.0,
        };
        apply_kick(&mut ball, &kick, 5);
        assert_eq!(ball.speed(), 0.0);
    }

    #[test]
    fn test_lofted_ball_comes_back_down() {
        let mut ball = rolling_ball((30.0, 34.0), (5.0, 0.0));
        ball.velocity_z = 8.0;
        let field = Field::default();

        let mut peak = 0.0f32;
        for _ in 0..600 {
            step(&mut ball, &field, 0.01);
            peak = peak.max(ball.height);
        }
        assert!(peak > 1.0, "ball never rose: peak {}", peak);
        assert_eq!(ball.height, 0.0);
        assert_eq!(ball.velocity_z, 0.0);
    }

    #[test]
    fn test_shot_into_the_mouth_scores() {
        let field = Field::default();
        // One meter out, straight at the away goal centre.
        let mut ball = rolling_ball((field.length_m - 1.0, 34.0), (30.0, 0.0));
        let mut scored = None;
        for _ in 0..20 {
            let outcome = step(&mut ball, &field, 0.01);
            if outcome.goal.is_some() {
                scored = outcome.goal;
                break;
            }
        }
        assert_eq!(scored, Some(TeamSide::Home));
    }

    #[test]
    fn test_wide_shot_reflects_instead_of_scoring() {
        let field = Field::default();
        // Aimed well wide of the posts.
        let mut ball = rolling_ball((field.length_m - 1.0, 10.0), (30.0, 0.0));
        let mut bounced = false;
        for _ in 0..20 {
            let outcome = step(&mut ball, &field, 0.01);
            assert!(outcome.goal.is_none());
            bounced |= outcome.bounced_boundary;
        }
        assert!(bounced);
        assert!(ball.position.0 <= field.length_m);
        assert!(ball.velocity.0 <= 0.0, "reflection should reverse x velocity");
    }

    #[test]
    fn test_high_shot_over_the_bar_does_not_score() {
        let field = Field::default();
        let mut ball = rolling_ball((field.length_m - 0.5, 34.0), (30.0, 0.0));
        ball.height = 3.0;
        let outcome = step(&mut ball, &field, 0.05);
        assert!(outcome.goal.is_none());
    }

    #[test]
    fn test_touchline_reflection() {
        let field = Field::default();
        let mut ball = rolling_ball((50.0, 0.5), (0.0, -10.0));
        let outcome = step(&mut ball, &field, 0.1);
        assert!(outcome.bounced_boundary);
        assert!(ball.position.1 >= 0.0);
        assert!(ball.velocity.1 >= 0.0);
    }

    #[test]
    fn test_curved_flight_bends() {
        let field = Field::default();
        let mut straight = rolling_ball((20.0, 34.0), (25.0, 0.0));
        let mut curved = rolling_ball((20.0, 34.0), (25.0, 0.0));
        curved.spin = params::MAX_SPIN;
        curved.height = 1.0;
        curved.velocity_z = 3.0;
        straight.height = 1.0;
        straight.velocity_z = 3.0;

        for _ in 0..50 {
            step(&mut straight, &field, 0.01);
            step(&mut curved, &field, 0.01);
        }
        assert!(
            (curved.position.1 - straight.position.1).abs() > 0.05,
            "spin had no visible effect"
        );
    }
}
