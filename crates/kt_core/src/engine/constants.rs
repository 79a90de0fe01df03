//! Simulation constants, grouped by subsystem.

/// Match clock boundaries, in ticks (1 tick = 1ms of simulated time).
pub mod clock {
    use crate::engine::scheduler::Tick;

    pub const MS_PER_MINUTE: Tick = 60_000;

    /// First period ends at 45:00.
    pub const FIRST_HALF_END: Tick = 45 * MS_PER_MINUTE;

    /// Final whistle at 90:00.
    pub const FULL_TIME: Tick = 90 * MS_PER_MINUTE;

    /// Opening kickoff fires on the first tick.
    pub const KICKOFF_TICK: Tick = 1;

    /// Player chains start one tick after the kickoff signal.
    pub const CHAIN_START_TICK: Tick = 2;

    /// Delay between a goal and the restart from the centre spot.
    pub const GOAL_RESTART_DELAY: Tick = 3_000;
}

/// Pitch geometry defaults (FIFA standard dimensions).
pub mod field {
    pub const LENGTH_M: f32 = 105.0;
    pub const WIDTH_M: f32 = 68.0;
    pub const GOAL_WIDTH_M: f32 = 7.32;
    pub const GOAL_HEIGHT_M: f32 = 2.44;
}

/// Ball physics parameters.
pub mod ball {
    pub const MASS_KG: f32 = 0.43;
    pub const GRAVITY: f32 = 9.81;

    /// Quadratic air drag coefficient (lumped, includes area and density).
    pub const DRAG_COEFFICIENT: f32 = 0.01;

    /// Rolling resistance coefficient against the pitch.
    pub const ROLLING_RESISTANCE: f32 = 0.05;

    /// Below this speed the ball counts as stationary and its physics
    /// chain suspends.
    pub const SLEEP_SPEED_MPS: f32 = 0.001;

    /// Speed at which the physics chain runs at its tightest interval.
    pub const FAST_SPEED_MPS: f32 = 30.0;

    /// Vertical energy retained per ground bounce.
    pub const BOUNCE_RESTITUTION: f32 = 0.65;

    /// Below this vertical speed a bounce ends and the ball rolls.
    pub const BOUNCE_MIN_VZ_MPS: f32 = 0.5;

    /// Speed retained when the ball is played against a boundary line.
    pub const BOUNDARY_DAMPING: f32 = 0.55;

    /// Kick speed at full power.
    pub const MAX_KICK_SPEED_MPS: f32 = 34.0;

    /// Vertical launch speed at full lift.
    pub const MAX_KICK_VZ_MPS: f32 = 14.0;

    /// Sidespin at full curve, in rad/s.
    pub const MAX_SPIN: f32 = 8.0;

    /// Per-second spin decay factor.
    pub const SPIN_DECAY: f32 = 0.85;

    /// Lateral acceleration per rad/s of sidespin while airborne.
    pub const SPIN_CURVE_ACCEL: f32 = 0.12;

    /// A player can play the ball within this radius.
    pub const CONTROL_RADIUS_M: f32 = 1.2;

    /// A player can play the ball below this height.
    pub const CONTROL_HEIGHT_M: f32 = 1.6;
}

/// Player motion parameters.
pub mod player_motion {
    /// Integration steps are clamped into this range, in seconds.
    pub const DT_MIN: f32 = 0.001;
    pub const DT_MAX: f32 = 0.25;

    /// Within this distance of the target the player brakes out.
    pub const ARRIVAL_THRESHOLD_M: f32 = 0.2;

    pub const SPEED_EPSILON: f32 = 0.01;

    /// Sharpest allowed speed reduction from turning.
    pub const TURN_PENALTY_MIN: f32 = 0.25;

    /// Body rotation rate toward the face target, in rad/s.
    pub const TURN_RATE_RAD_PER_S: f32 = 6.0;

    /// Velocity damping per second when coasting.
    pub const DRAG_PER_S: f32 = 0.08;

    /// Top speed range mapped from the pace attribute (0-100).
    pub const MAX_SPEED_FLOOR_MPS: f32 = 6.0;
    pub const MAX_SPEED_CEIL_MPS: f32 = 9.5;

    /// Acceleration range mapped from the acceleration attribute.
    pub const ACCEL_FLOOR_MPS2: f32 = 3.0;
    pub const ACCEL_CEIL_MPS2: f32 = 7.0;

    pub const DECEL_MPS2: f32 = 6.0;

    /// Stamina drained per second at full sprint.
    pub const STAMINA_DRAIN_PER_S: f32 = 1.2e-4;

    /// Stamina never drops below this.
    pub const STAMINA_FLOOR: f32 = 0.2;
}

/// Play heuristics shared between the AI layer and statistics.
pub mod play {
    /// Distance from the opposing goal under which a kick counts as a
    /// shot attempt.
    pub const SHOOTING_RANGE_M: f32 = 25.0;
}

/// Re-scheduling intervals for the three event chains, in ticks.
pub mod cadence {
    use crate::engine::scheduler::Tick;

    /// Ball physics: 5ms for fast shots, up to 20ms for slow rolls.
    pub const BALL_INTERVAL_MIN: Tick = 5;
    pub const BALL_INTERVAL_MAX: Tick = 20;

    /// Player physics: 10ms at full sprint, 50ms standing still.
    pub const PLAYER_INTERVAL_MIN: Tick = 10;
    pub const PLAYER_INTERVAL_MAX: Tick = 50;

    /// Player AI: 30ms near the action, up to 200ms far from it.
    pub const AI_INTERVAL_MIN: Tick = 30;
    pub const AI_INTERVAL_MAX: Tick = 200;

    /// Beyond this distance from the ball a player is maximally passive.
    pub const AI_FAR_DISTANCE_M: f32 = 40.0;
}
