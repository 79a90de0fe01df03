//! Re-scheduling cadence for the three event chains.
//!
//! Each chain picks the interval to its next firing from current state:
//! the faster things are happening around a subsystem, the sooner it runs
//! again. Any monotonic curve inside the stated bounds works; these are
//! plain linear ramps.

use crate::engine::constants::{ball, cadence};
use crate::engine::scheduler::Tick;

#[inline]
fn lerp_interval(min: Tick, max: Tick, activity: f32) -> Tick {
    let t = activity.clamp(0.0, 1.0);
    let span = (max - min) as f32;
    max - (span * t).round() as Tick
}

/// Interval until the next ball integration step, or `None` when the ball
/// has settled and the chain should suspend.
#[inline]
pub fn ball_interval(speed_mps: f32, airborne: bool) -> Option<Tick> {
    if speed_mps < ball::SLEEP_SPEED_MPS && !airborne {
        return None;
    }
    let activity = speed_mps / ball::FAST_SPEED_MPS;
    Some(lerp_interval(
        cadence::BALL_INTERVAL_MIN,
        cadence::BALL_INTERVAL_MAX,
        activity,
    ))
}

/// Interval until the next motion step: sprinting players integrate at
/// 10ms, stationary ones at 50ms.
#[inline]
pub fn player_physics_interval(speed_mps: f32, max_speed_mps: f32) -> Tick {
    let activity = if max_speed_mps > 0.0 {
        speed_mps / max_speed_mps
    } else {
        0.0
    };
    lerp_interval(
        cadence::PLAYER_INTERVAL_MIN,
        cadence::PLAYER_INTERVAL_MAX,
        activity,
    )
}

/// Interval until the next deliberation. Proximity to the ball dominates;
/// awareness sharpens distant players' attention a little.
#[inline]
pub fn ai_interval(distance_to_ball_m: f32, awareness01: f32) -> Tick {
    let far = (distance_to_ball_m / cadence::AI_FAR_DISTANCE_M).clamp(0.0, 1.0);
    let attention = 1.0 - far * (1.0 - 0.3 * awareness01.clamp(0.0, 1.0));
    lerp_interval(
        cadence::AI_INTERVAL_MIN,
        cadence::AI_INTERVAL_MAX,
        attention,
    )
}

/// Clamp an AI-provided next-think hint into the allowed band.
#[inline]
pub fn clamp_ai_hint(hint: Tick) -> Tick {
    hint.clamp(cadence::AI_INTERVAL_MIN, cadence::AI_INTERVAL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_ball_suspends() {
        assert_eq!(ball_interval(0.0, false), None);
        assert_eq!(ball_interval(0.0005, false), None);
    }

    #[test]
    fn test_airborne_ball_keeps_chain_alive() {
        assert!(ball_interval(0.0, true).is_some());
    }

    #[test]
    fn test_ball_interval_bounds() {
        let fast = ball_interval(40.0, false).unwrap();
        let slow = ball_interval(0.01, false).unwrap();
        assert_eq!(fast, 5);
        assert_eq!(slow, 20);
    }

    #[test]
    fn test_ball_interval_monotone_in_speed() {
        let mut last = u32::MAX;
        for speed in [0.5, 2.0, 8.0, 15.0, 25.0, 35.0] {
            let interval = ball_interval(speed, false).unwrap();
            assert!(interval <= last, "interval grew with speed");
            last = interval;
        }
    }

    #[test]
    fn test_player_interval_bounds() {
        assert_eq!(player_physics_interval(0.0, 9.0), 50);
        assert_eq!(player_physics_interval(9.0, 9.0), 10);
        let mid = player_physics_interval(4.5, 9.0);
        assert!(mid > 10 && mid < 50);
    }

    #[test]
    fn test_ai_interval_near_and_far() {
        let near = ai_interval(0.0, 0.6);
        let far = ai_interval(100.0, 0.6);
        assert_eq!(near, 30);
        assert!(far > near);
        assert!(far <= 200);
    }

    #[test]
    fn test_awareness_sharpens_distant_players() {
        let dull = ai_interval(60.0, 0.0);
        let alert = ai_interval(60.0, 1.0);
        assert!(alert < dull);
    }

    #[test]
    fn test_hint_clamp() {
        assert_eq!(clamp_ai_hint(1), 30);
        assert_eq!(clamp_ai_hint(90), 90);
        assert_eq!(clamp_ai_hint(5_000), 200);
    }
}
