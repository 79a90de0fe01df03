//! AI layer.
//!
//! Plug-ins implement [`PlayerBrain`] and are invoked only from inside a
//! player-AI event. They get a read-only view of the match and write-only
//! access to the acting player's intentions; kicks requested through the
//! intentions record are applied (and the ball chain re-armed) by the
//! match engine, never by the brain itself.

use crate::engine::constants::play::SHOOTING_RANGE_M;
use crate::engine::deterministic::{self, subcase};
use crate::engine::field::Field;
use crate::engine::match_state::{MatchPhase, MatchWorld, Score};
use crate::engine::player::{Intentions, KickIntent, Player, PlayerId, PlayerSkills};
use crate::engine::player_physics::motion_params;
use crate::engine::scheduler::Tick;
use crate::engine::steering::{distance, pursuit_point};
use crate::engine::team::{Team, TeamSide};
use crate::error::Result;

/// Read-only view of the match handed to AI plug-ins.
pub struct MatchView<'a> {
    world: &'a MatchWorld,
    tick: Tick,
}

impl<'a> MatchView<'a> {
    pub(crate) fn new(world: &'a MatchWorld, tick: Tick) -> Self {
        Self { world, tick }
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.world.field
    }

    #[inline]
    pub fn phase(&self) -> MatchPhase {
        self.world.phase
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.world.score
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.world.rng.seed()
    }

    #[inline]
    pub fn ball_position(&self) -> (f32, f32) {
        self.world.ball.position
    }

    #[inline]
    pub fn ball_velocity(&self) -> (f32, f32) {
        self.world.ball.velocity
    }

    #[inline]
    pub fn ball_speed(&self) -> f32 {
        self.world.ball.speed()
    }

    #[inline]
    pub fn ball_height(&self) -> f32 {
        self.world.ball.height
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        self.world.player(id)
    }

    #[inline]
    pub fn team(&self, side: TeamSide) -> &Team {
        self.world.team(side)
    }

    pub fn side_players(&self, side: TeamSide) -> impl Iterator<Item = &Player> {
        self.world.side_players(side)
    }

    /// Closest player of `side` to the ball.
    pub fn nearest_to_ball(&self, side: TeamSide) -> Option<PlayerId> {
        self.world.nearest_to_ball(side)
    }

    /// Whether `id` is close enough to play the ball right now.
    pub fn can_reach_ball(&self, id: PlayerId) -> bool {
        self.world.can_reach_ball(id)
    }
}

/// What a deliberation produced besides the new intentions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Thought {
    /// Requested ticks until the next deliberation. The engine clamps this
    /// into the allowed cadence band; `None` lets the engine pick from
    /// context.
    pub next_think_hint: Option<Tick>,
}

/// A per-player decision maker.
///
/// Brains are trusted code: an error return aborts the simulation. `Send`
/// because the real-time wrapper may run the engine on a worker thread.
pub trait PlayerBrain: Send {
    fn think(
        &mut self,
        view: &MatchView<'_>,
        player: PlayerId,
        intentions: &mut Intentions,
    ) -> Result<Thought>;
}

// =============================================================================
// Default brain
// =============================================================================

/// Pull of the ball on off-ball players' holding positions.
const BALL_PULL: f32 = 0.25;

/// Cap on how far ahead of a rolling ball a chase is led, in seconds.
const CHASE_LOOKAHEAD_MAX_S: f32 = 1.5;

/// Deterministic role-based brain: the nearest player chases and plays the
/// ball, everyone else holds a ball-shifted formation position.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleBrain;

impl RoleBrain {
    fn chase_target(view: &MatchView<'_>, player: &Player) -> (f32, f32) {
        // Meet the rolling ball ahead of where it is, not where it was.
        let own_speed = motion_params(&player.skills, player.context.stamina).max_speed;
        let aim = pursuit_point(
            player.body.position,
            view.ball_position(),
            view.ball_velocity(),
            own_speed,
            CHASE_LOOKAHEAD_MAX_S,
        );
        view.field().clamp(aim)
    }

    fn hold_target(view: &MatchView<'_>, player: &Player) -> (f32, f32) {
        // Elastic band: the anchor, shifted toward the ball by the team's
        // pressing appetite, pushed up or dropped by the line height.
        let side = player.context.side;
        let instructions = view.team(side).instructions;
        let pull = BALL_PULL * (0.5 + instructions.pressing);
        let line_push = (instructions.line_height - 0.5) * 8.0 * side.attack_sign();
        let anchor = (player.context.anchor.0 + line_push, player.context.anchor.1);
        let ball = view.ball_position();
        let center = view.field().center();
        let shift = (ball.0 - center.0, ball.1 - center.1);
        let drift = deterministic::jitter_f32(
            view.seed(),
            view.tick() / 10_000,
            player.id.index(),
            subcase::HOLD_DRIFT,
            -1.5,
            1.5,
        );
        view.field().clamp((
            anchor.0 + shift.0 * pull,
            anchor.1 + shift.1 * pull + drift,
        ))
    }

    fn plan_kick(view: &MatchView<'_>, player: &Player) -> KickIntent {
        let seed = view.seed();
        let tick = view.tick();
        let actor = player.id.index();
        let side = player.context.side;
        let my_pos = player.body.position;

        let goal = view.field().goal_center(side.opponent());
        let goal_dist = distance(my_pos, goal);

        if goal_dist <= SHOOTING_RANGE_M {
            // Shot: aim at the mouth with deterministic scatter. Poor
            // technique sprays well wide of the posts; even good finishers
            // miss some.
            let half_mouth = view.field().goal_width_m / 2.0;
            let technique = PlayerSkills::norm(player.skills.technique);
            let spread = half_mouth * (2.4 - 1.4 * technique);
            let aim_y = goal.1
                + deterministic::jitter_f32(
                    seed,
                    tick,
                    actor,
                    subcase::SHOT_TARGET_Y,
                    -spread,
                    spread,
                );
            let power = deterministic::jitter_f32(seed, tick, actor, subcase::SHOT_POWER, 0.75, 1.0);
            let curve =
                deterministic::jitter_f32(seed, tick, actor, subcase::SHOT_CURVE, -0.3, 0.3);
            return KickIntent {
                direction: (goal.0 - my_pos.0, aim_y - my_pos.1),
                power,
                lift: 0.15 * (1.0 - technique) + 0.05,
                curve: curve * technique,
            };
        }

        // Pass: pick among the teammates ahead of the ball carrier.
        let forward: Vec<&Player> = view
            .side_players(side)
            .filter(|mate| {
                mate.id != player.id
                    && (mate.body.position.0 - my_pos.0) * side.attack_sign() > -5.0
            })
            .collect();
        let target = if forward.is_empty() {
            // Nobody ahead: clear toward the opposing goal.
            goal
        } else {
            let pick = deterministic::choice(seed, tick, actor, subcase::PASS_TARGET, forward.len());
            forward[pick].body.position
        };

        let pass_dist = distance(my_pos, target);
        // Higher tempo drives the ball in harder.
        let tempo = view.team(side).instructions.tempo;
        let power = (pass_dist / 40.0).clamp(0.25, 0.9)
            * (0.9 + 0.2 * tempo)
            * deterministic::jitter_f32(seed, tick, actor, subcase::PASS_POWER, 0.9, 1.1);
        KickIntent {
            direction: (target.0 - my_pos.0, target.1 - my_pos.1),
            power: power.clamp(0.2, 1.0),
            lift: if pass_dist > 30.0 { 0.4 } else { 0.0 },
            curve: 0.0,
        }
    }
}

impl PlayerBrain for RoleBrain {
    fn think(
        &mut self,
        view: &MatchView<'_>,
        player: PlayerId,
        intentions: &mut Intentions,
    ) -> Result<Thought> {
        if view.phase() == MatchPhase::Finished {
            intentions.clear();
            return Ok(Thought::default());
        }

        let me = view.player(player);
        let side = me.context.side;
        let chaser = view.nearest_to_ball(side);

        intentions.kick = None;
        intentions.face_target = Some(view.ball_position());

        if chaser == Some(player) {
            if view.can_reach_ball(player) {
                // On the ball: play it and hold position for the follow-up.
                intentions.kick = Some(Self::plan_kick(view, me));
                intentions.target_position = Some(me.body.position);
            } else {
                let jitter = deterministic::jitter_f32(
                    view.seed(),
                    view.tick(),
                    player.index(),
                    subcase::CHASE_JITTER,
                    -0.3,
                    0.3,
                );
                let target = Self::chase_target(view, me);
                intentions.target_position = Some((target.0, target.1 + jitter));
            }
        } else {
            intentions.target_position = Some(Self::hold_target(view, me));
        }

        Ok(Thought::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::team::TeamSide;

    fn world_at_kickoff(seed: u64) -> MatchWorld {
        let mut world = MatchWorld::with_generated_squads("H", "A", seed).unwrap();
        world.setup_kickoff(TeamSide::Home, 1);
        world
    }

    #[test]
    fn test_carrier_kicks_when_on_the_ball() {
        let world = world_at_kickoff(5);
        let taker = world.nearest_to_ball(TeamSide::Home).unwrap();
        let view = MatchView::new(&world, 10);

        let mut intentions = Intentions::default();
        RoleBrain.think(&view, taker, &mut intentions).unwrap();

        assert!(intentions.kick.is_some(), "kickoff taker should play the ball");
    }

    #[test]
    fn test_off_ball_players_hold_position_without_kicking() {
        let world = world_at_kickoff(5);
        let keeper = world.team(TeamSide::Home).roster[0];
        let view = MatchView::new(&world, 10);

        let mut intentions = Intentions::default();
        RoleBrain.think(&view, keeper, &mut intentions).unwrap();

        assert!(intentions.kick.is_none());
        let target = intentions.target_position.unwrap();
        let anchor = world.player(keeper).context.anchor;
        assert!(
            distance(target, anchor) < 15.0,
            "keeper drifted {}m from anchor",
            distance(target, anchor)
        );
    }

    #[test]
    fn test_chaser_runs_at_the_ball() {
        let mut world = world_at_kickoff(5);
        // Move the ball away from everyone.
        world.ball.position = (70.0, 20.0);
        let chaser = world.nearest_to_ball(TeamSide::Home).unwrap();
        let view = MatchView::new(&world, 10);

        let mut intentions = Intentions::default();
        RoleBrain.think(&view, chaser, &mut intentions).unwrap();

        let target = intentions.target_position.unwrap();
        assert!(
            distance(target, world.ball.position) < 3.0,
            "chase target {:?} is far from the ball",
            target
        );
    }

    #[test]
    fn test_shot_in_range_aims_at_the_mouth() {
        let mut world = world_at_kickoff(5);
        let striker = world.team(TeamSide::Home).roster[9];
        // Put the striker (and the ball at their feet) near the away goal.
        world.player_mut(striker).body.position = (95.0, 34.0);
        world.ball.position = (95.3, 34.0);

        let view = MatchView::new(&world, 1_000);
        let mut intentions = Intentions::default();
        RoleBrain.think(&view, striker, &mut intentions).unwrap();

        let kick = intentions.kick.expect("striker in range should shoot");
        assert!(kick.direction.0 > 0.0, "shot should go toward the away goal");
        assert!(kick.power >= 0.75);
    }

    #[test]
    fn test_same_inputs_same_decision() {
        let world = world_at_kickoff(5);
        let taker = world.nearest_to_ball(TeamSide::Home).unwrap();

        let mut a = Intentions::default();
        let mut b = Intentions::default();
        RoleBrain
            .think(&MatchView::new(&world, 10), taker, &mut a)
            .unwrap();
        RoleBrain
            .think(&MatchView::new(&world, 10), taker, &mut b)
            .unwrap();

        let (ka, kb) = (a.kick.unwrap(), b.kick.unwrap());
        assert_eq!(ka.power.to_bits(), kb.power.to_bits());
        assert_eq!(ka.direction.0.to_bits(), kb.direction.0.to_bits());
    }

    #[test]
    fn test_finished_match_clears_intentions() {
        let mut world = world_at_kickoff(5);
        world.phase = MatchPhase::Finished;
        let anyone = world.players[3].id;

        let mut intentions = Intentions {
            target_position: Some((1.0, 1.0)),
            face_target: None,
            kick: None,
        };
        RoleBrain
            .think(&MatchView::new(&world, 10), anyone, &mut intentions)
            .unwrap();
        assert!(intentions.target_position.is_none());
    }
}
