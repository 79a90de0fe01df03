//! Match engine: the integration layer.
//!
//! Owns the scheduler, the world, and the AI plug-in, and enforces the
//! re-scheduling discipline: event callbacks mutate the world and report
//! what should happen next; every actual `schedule` call happens in one
//! place here. No subsystem re-arms itself.

use crate::engine::ball_physics;
use crate::engine::brain::{MatchView, PlayerBrain, RoleBrain};
use crate::engine::cadence;
use crate::engine::constants::clock;
use crate::engine::match_state::{MatchEvent, MatchEventKind, MatchPhase, MatchWorld};
use crate::engine::player::{PlayerId, PlayerSkills};
use crate::engine::player_physics;
use crate::engine::scheduler::{
    Drivable, Event, EventKind, RefereeSignal, Scheduler, Tick,
};
use crate::engine::snapshot::MatchSnapshot;
use crate::engine::steering::distance;
use crate::error::{Result, SimError};

/// Period boundaries for one match, in ticks.
#[derive(Clone, Copy, Debug)]
pub struct MatchClock {
    pub first_half_end: Tick,
    pub full_time: Tick,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self {
            first_half_end: clock::FIRST_HALF_END,
            full_time: clock::FULL_TIME,
        }
    }
}

impl MatchClock {
    /// A shortened match; useful for quick simulations and tests.
    pub fn with_minutes(minutes: Tick) -> Self {
        let full = minutes.max(1) * clock::MS_PER_MINUTE;
        Self {
            first_half_end: full / 2,
            full_time: full,
        }
    }
}

/// What one event dispatch wants scheduled next. Applied by the engine at
/// a single call site.
#[derive(Clone, Copy, Debug, Default)]
struct StepOutcome {
    /// Re-arm the fired chain this many ticks ahead; `None` suspends it.
    rearm_after: Option<Tick>,
    /// A kick accelerated the ball: arm the ball chain on the next tick.
    arm_ball: bool,
    /// Schedule a referee signal this many ticks ahead.
    referee_followup: Option<(Tick, RefereeSignal)>,
}

pub struct MatchEngine {
    scheduler: Scheduler,
    world: MatchWorld,
    brain: Box<dyn PlayerBrain>,
    clock: MatchClock,
    /// Whether a live ball physics chain exists; guards double-arming.
    ball_armed: bool,
}

impl MatchEngine {
    /// Build the engine and schedule the opening event chains: the
    /// kickoff, the period boundaries, and one physics + AI chain per
    /// player. The ball chain stays unarmed until the first kick.
    pub fn start(
        world: MatchWorld,
        brain: Box<dyn PlayerBrain>,
        match_clock: MatchClock,
    ) -> Result<Self> {
        let mut engine = Self {
            scheduler: Scheduler::new(),
            world,
            brain,
            clock: match_clock,
            ball_armed: false,
        };

        engine.scheduler.schedule(
            clock::KICKOFF_TICK,
            EventKind::Referee {
                signal: RefereeSignal::Kickoff,
            },
        )?;
        engine.scheduler.schedule(
            engine.clock.first_half_end,
            EventKind::Referee {
                signal: RefereeSignal::HalfTime,
            },
        )?;
        engine.scheduler.schedule(
            engine.clock.full_time,
            EventKind::Referee {
                signal: RefereeSignal::FullTime,
            },
        )?;

        for idx in 0..engine.world.players.len() {
            let player = PlayerId(idx);
            engine
                .scheduler
                .schedule(clock::CHAIN_START_TICK, EventKind::PlayerPhysics { player })?;
            // Stagger deliberations so 22 brains don't fire on one tick.
            engine.scheduler.schedule(
                clock::CHAIN_START_TICK + idx as Tick,
                EventKind::PlayerAi { player },
            )?;
        }

        Ok(engine)
    }

    /// Engine with the deterministic default brain and the regulation
    /// 90-minute clock.
    pub fn with_default_brain(world: MatchWorld) -> Result<Self> {
        Self::start(world, Box::new(RoleBrain), MatchClock::default())
    }

    #[inline]
    pub fn world(&self) -> &MatchWorld {
        &self.world
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.scheduler.current_tick()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.world.phase == MatchPhase::Finished
    }

    /// One-way copy of render-relevant state at the current tick.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.world, self.current_tick())
    }

    pub fn into_world(self) -> MatchWorld {
        self.world
    }

    fn drain(&mut self, target: Tick) -> Result<()> {
        let world = &mut self.world;
        let brain = self.brain.as_mut();
        let ball_armed = &mut self.ball_armed;
        let result = self.scheduler.run_until(target, |sched, ev| {
            let outcome = step_event(world, brain, ev)?;
            apply_outcome(sched, ball_armed, ev, outcome)
        });
        if let Err(err) = &result {
            // The world stays inspectable; the log marks where it stopped.
            let tick = self.scheduler.current_tick();
            self.world
                .log
                .error(tick, format!("simulation aborted: {}", err));
        }
        result
    }
}

impl Drivable for MatchEngine {
    fn current_tick(&self) -> Tick {
        self.scheduler.current_tick()
    }

    fn advance_to(&mut self, target: Tick) -> Result<()> {
        self.drain(target)
    }

    fn advance_to_end(&mut self) -> Result<()> {
        while let Some(tick) = self.scheduler.peek_tick() {
            self.drain(tick)?;
        }
        Ok(())
    }

    fn next_event_tick(&mut self) -> Option<Tick> {
        self.scheduler.peek_tick()
    }

    fn is_idle(&self) -> bool {
        self.scheduler.is_empty()
    }
}

// =============================================================================
// Event dispatch
// =============================================================================

/// Ticks-to-seconds for chain steps driven by their own last-step marker.
#[inline]
fn chain_dt(now: Tick, last: Tick) -> f32 {
    now.saturating_sub(last).max(1) as f32 / 1000.0
}

fn step_event(
    world: &mut MatchWorld,
    brain: &mut dyn PlayerBrain,
    ev: Event,
) -> Result<StepOutcome> {
    match ev.kind {
        EventKind::BallPhysics => Ok(step_ball(world, ev.tick)),
        EventKind::PlayerPhysics { player } => Ok(step_player_physics(world, player, ev.tick)),
        EventKind::PlayerAi { player } => step_player_ai(world, brain, player, ev.tick),
        EventKind::Referee { signal } => Ok(step_referee(world, signal, ev.tick)),
        EventKind::Debug { probe } => {
            world.log.debug(ev.tick, format!("debug probe {}", probe));
            Ok(StepOutcome::default())
        }
    }
}

fn step_ball(world: &mut MatchWorld, tick: Tick) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if world.phase == MatchPhase::Finished {
        world.ball.halt();
        return outcome;
    }

    let dt = chain_dt(tick, world.ball.last_step_tick);
    let step = ball_physics::step(&mut world.ball, &world.field, dt);
    world.ball.last_step_tick = tick;

    if let Some(scoring_side) = step.goal {
        world.record_goal(tick, scoring_side);
        world.ball.halt();
        outcome.referee_followup = Some((
            clock::GOAL_RESTART_DELAY,
            RefereeSignal::GoalRestart {
                side: scoring_side.opponent(),
            },
        ));
        return outcome;
    }

    if step.bounced_boundary {
        world.log.debug(tick, "ball played off the boundary");
    }

    match cadence::ball_interval(world.ball.speed(), world.ball.is_airborne()) {
        Some(interval) => outcome.rearm_after = Some(interval),
        None => {
            world.ball.halt();
            world.log.debug(tick, "ball settled; physics chain suspended");
        }
    }
    outcome
}

fn step_player_physics(world: &mut MatchWorld, player: PlayerId, tick: Tick) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if world.phase == MatchPhase::Finished {
        return outcome;
    }

    let dt = chain_dt(tick, world.player(player).body.last_step_tick);
    {
        let MatchWorld { players, field, .. } = world;
        let p = &mut players[player.index()];
        player_physics::step(p, field, dt);
        p.body.last_step_tick = tick;
    }

    let p = world.player(player);
    let params = player_physics::motion_params(&p.skills, p.context.stamina);
    outcome.rearm_after = Some(cadence::player_physics_interval(
        p.body.speed(),
        params.max_speed,
    ));
    outcome
}

fn step_player_ai(
    world: &mut MatchWorld,
    brain: &mut dyn PlayerBrain,
    player: PlayerId,
    tick: Tick,
) -> Result<StepOutcome> {
    let mut outcome = StepOutcome::default();
    if world.phase == MatchPhase::Finished {
        return Ok(outcome);
    }

    // Intentions are taken out, written by the brain against a read-only
    // view, then written back; the kick request is consumed here.
    let mut intentions = world.player(player).intentions;
    let thought = {
        let view = MatchView::new(world, tick);
        brain.think(&view, player, &mut intentions)
    }
    .map_err(|err| SimError::AiFailure {
        player: player.index(),
        tick,
        message: err.to_string(),
    })?;

    if let Some(kick) = intentions.kick.take() {
        if world.can_reach_ball(player) {
            world.apply_kick(player, &kick, tick);
            outcome.arm_ball = true;
        }
        // Out of reach: the request is dropped, not deferred.
    }

    {
        let p = world.player_mut(player);
        p.intentions = intentions;
        p.context.last_think_tick = tick;
    }

    let p = world.player(player);
    let dist = distance(p.body.position, world.ball.position);
    let interval = match thought.next_think_hint {
        Some(hint) => cadence::clamp_ai_hint(hint),
        None => cadence::ai_interval(dist, PlayerSkills::norm(p.skills.awareness)),
    };
    outcome.rearm_after = Some(interval);
    Ok(outcome)
}

fn step_referee(world: &mut MatchWorld, signal: RefereeSignal, tick: Tick) -> StepOutcome {
    match signal {
        RefereeSignal::Kickoff => {
            world.setup_kickoff(crate::engine::team::TeamSide::Home, tick);
        }
        RefereeSignal::GoalRestart { side } => {
            if world.phase != MatchPhase::Finished {
                world.setup_kickoff(side, tick);
            }
        }
        RefereeSignal::HalfTime => {
            world.phase = MatchPhase::SecondHalf;
            world.events.push(MatchEvent {
                tick,
                minute: MatchWorld::minute(tick),
                kind: MatchEventKind::HalfTime,
            });
            world.log.info(tick, "half-time");
            world.setup_kickoff(crate::engine::team::TeamSide::Away, tick);
        }
        RefereeSignal::FullTime => {
            world.phase = MatchPhase::Finished;
            world.ball.halt();
            world.events.push(MatchEvent {
                tick,
                minute: MatchWorld::minute(tick),
                kind: MatchEventKind::FullTime,
            });
            world.log.info(
                tick,
                format!("full time {}-{}", world.score.home, world.score.away),
            );
        }
    }
    StepOutcome::default()
}

/// The single scheduling site: turn a step outcome into `schedule` calls.
fn apply_outcome(
    sched: &mut Scheduler,
    ball_armed: &mut bool,
    ev: Event,
    outcome: StepOutcome,
) -> Result<()> {
    match outcome.rearm_after {
        Some(offset) => {
            sched.schedule_on_offset(offset, ev.kind)?;
        }
        None => {
            if matches!(ev.kind, EventKind::BallPhysics) {
                *ball_armed = false;
            }
        }
    }

    if outcome.arm_ball && !*ball_armed {
        sched.schedule_on_next_tick(EventKind::BallPhysics)?;
        *ball_armed = true;
    }

    if let Some((offset, signal)) = outcome.referee_followup {
        sched.schedule_on_offset(offset, EventKind::Referee { signal })?;
    }
    Ok(())
}
