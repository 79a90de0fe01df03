//! Player motion integration.
//!
//! Inertia-based movement: the AI sets a target position, this module
//! turns it into velocity changes bounded by acceleration, turning skill,
//! and drag. Ability ratings are interpreted as physics parameters; there
//! are no separate movement stats.

use crate::engine::constants::player_motion::*;
use crate::engine::field::Field;
use crate::engine::player::{Player, PlayerSkills};
use crate::engine::steering::rotate_toward;

/// Physical movement envelope derived from ability ratings.
#[derive(Clone, Copy, Debug)]
pub struct MotionParams {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    /// Turning ability, `[0, 1]`.
    pub turn_skill: f32,
    pub drag: f32,
}

/// Map ability ratings to motion parameters, scaled by remaining stamina.
///
/// pace -> top speed, acceleration -> accel, agility + balance -> turning.
pub fn motion_params(skills: &PlayerSkills, stamina01: f32) -> MotionParams {
    let stamina = stamina01.clamp(0.0, 1.0);
    // Tired players lose sharpness before they lose top speed.
    let speed_scale = 0.7 + 0.3 * stamina;
    let accel_scale = 0.5 + 0.5 * stamina;

    let pace = PlayerSkills::norm(skills.pace);
    let accel = PlayerSkills::norm(skills.acceleration);
    let turn = 0.5 * (PlayerSkills::norm(skills.agility) + PlayerSkills::norm(skills.balance));

    MotionParams {
        max_speed: (MAX_SPEED_FLOOR_MPS + (MAX_SPEED_CEIL_MPS - MAX_SPEED_FLOOR_MPS) * pace)
            * speed_scale,
        accel: (ACCEL_FLOOR_MPS2 + (ACCEL_CEIL_MPS2 - ACCEL_FLOOR_MPS2) * accel) * accel_scale,
        decel: DECEL_MPS2,
        turn_skill: turn,
        drag: DRAG_PER_S,
    }
}

/// Turn severity between two unit directions: 0 = straight on, 1 = full
/// reversal.
#[inline]
fn turn_severity(current_dir: (f32, f32), desired_dir: (f32, f32)) -> f32 {
    let dot = (current_dir.0 * desired_dir.0 + current_dir.1 * desired_dir.1).clamp(-1.0, 1.0);
    1.0 - (dot + 1.0) * 0.5
}

/// Speed multiplier from turning: fast, sharp turns with poor turn skill
/// cost the most.
#[inline]
fn turn_penalty(severity: f32, speed_ratio: f32, turn_skill: f32) -> f32 {
    (1.0 - severity * speed_ratio * (1.0 - turn_skill)).clamp(TURN_PENALTY_MIN, 1.0)
}

/// Braking distance for the arrival ramp: v^2 / 2a.
#[inline]
fn slowing_radius(speed: f32, decel: f32) -> f32 {
    if decel <= 0.0 {
        return ARRIVAL_THRESHOLD_M;
    }
    (speed * speed / (2.0 * decel)).max(ARRIVAL_THRESHOLD_M)
}

/// One inertia-based motion update toward `target`.
///
/// Returns the new (position, velocity).
pub fn update_motion(
    pos: (f32, f32),
    vel: (f32, f32),
    target: (f32, f32),
    dt: f32,
    params: &MotionParams,
) -> ((f32, f32), (f32, f32)) {
    let dt = dt.clamp(DT_MIN, DT_MAX);

    let to = (target.0 - pos.0, target.1 - pos.1);
    let dist = (to.0 * to.0 + to.1 * to.1).sqrt();

    // Close enough: coast down under drag.
    if dist < ARRIVAL_THRESHOLD_M {
        let decay = (1.0 - params.drag * dt).clamp(0.0, 1.0);
        let new_vel = (vel.0 * decay, vel.1 * decay);
        return (
            (pos.0 + new_vel.0 * dt, pos.1 + new_vel.1 * dt),
            new_vel,
        );
    }

    let desired_dir = (to.0 / dist, to.1 / dist);
    let speed = (vel.0 * vel.0 + vel.1 * vel.1).sqrt();
    let current_dir = if speed > SPEED_EPSILON {
        (vel.0 / speed, vel.1 / speed)
    } else {
        desired_dir
    };

    let severity = turn_severity(current_dir, desired_dir);
    let speed_ratio = (speed / params.max_speed.max(SPEED_EPSILON)).clamp(0.0, 1.0);
    let penalty = turn_penalty(severity, speed_ratio, params.turn_skill);

    // Arrival ramp: ease off inside the braking distance.
    let radius = slowing_radius(speed, params.decel);
    let arrival_speed = if dist < radius {
        params.max_speed * (dist / radius)
    } else {
        params.max_speed
    };

    let target_speed = arrival_speed * penalty;
    let desired_vel = (desired_dir.0 * target_speed, desired_dir.1 * target_speed);

    // Acceleration-limited velocity change.
    let max_delta = params.accel * dt;
    let delta = (desired_vel.0 - vel.0, desired_vel.1 - vel.1);
    let delta_len = (delta.0 * delta.0 + delta.1 * delta.1).sqrt();
    let vel = if delta_len <= max_delta || delta_len < SPEED_EPSILON {
        desired_vel
    } else {
        (
            vel.0 + delta.0 / delta_len * max_delta,
            vel.1 + delta.1 / delta_len * max_delta,
        )
    };

    let decay = (1.0 - params.drag * dt).clamp(0.0, 1.0);
    let vel = (vel.0 * decay, vel.1 * decay);

    ((pos.0 + vel.0 * dt, pos.1 + vel.1 * dt), vel)
}

/// One `PlayerPhysics` event: steer toward the intended position, rotate
/// toward the face target, keep the body on the pitch.
pub fn step(player: &mut Player, field: &Field, dt: f32) {
    let dt = dt.clamp(DT_MIN, DT_MAX);
    let params = motion_params(&player.skills, player.context.stamina);

    match player.intentions.target_position {
        Some(target) => {
            let (pos, vel) =
                update_motion(player.body.position, player.body.velocity, target, dt, &params);
            player.body.position = field.clamp(pos);
            player.body.velocity = vel;
        }
        None => {
            // No movement intention: bleed off residual velocity.
            let decay = (1.0 - params.drag * dt).clamp(0.0, 1.0);
            player.body.velocity = (
                player.body.velocity.0 * decay,
                player.body.velocity.1 * decay,
            );
            let pos = (
                player.body.position.0 + player.body.velocity.0 * dt,
                player.body.position.1 + player.body.velocity.1 * dt,
            );
            player.body.position = field.clamp(pos);
        }
    }

    // Effort costs stamina; the drain feeds back into the next step's
    // motion envelope.
    let effort = (player.body.speed() / params.max_speed.max(SPEED_EPSILON)).clamp(0.0, 1.0);
    player.context.stamina =
        (player.context.stamina - effort * STAMINA_DRAIN_PER_S * dt).max(STAMINA_FLOOR);

    // Face the requested target, otherwise the direction of travel.
    let face_dir = match player.intentions.face_target {
        Some(face) => (
            face.0 - player.body.position.0,
            face.1 - player.body.position.1,
        ),
        None => player.body.velocity,
    };
    player.body.facing = rotate_toward(player.body.facing, face_dir, TURN_RATE_RAD_PER_S * dt);
}
