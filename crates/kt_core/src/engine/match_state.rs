//! Match aggregate.
//!
//! Owns every entity for the duration of the match: field, teams, the
//! player arena, the ball, the seeded RNG, score, and the tick-tagged log.
//! Players are addressed by stable arena indices; nothing holds references
//! across callbacks.

use serde::{Deserialize, Serialize};

use crate::engine::ball::Ball;
use crate::engine::ball_physics;
use crate::engine::constants::{ball as ball_params, clock, play};
use crate::engine::event_log::EventLog;
use crate::engine::field::Field;
use crate::engine::player::{KickIntent, Player, PlayerId, PlayerSkills};
use crate::engine::rng::MatchRng;
use crate::engine::scheduler::Tick;
use crate::engine::stats::MatchStats;
use crate::engine::steering::distance;
use crate::engine::team::{Formation, Team, TeamSide, SQUAD_SIZE};
use crate::error::{Result, SimError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    FirstHalf,
    SecondHalf,
    Finished,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn add_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home = self.home.saturating_add(1),
            TeamSide::Away => self.away = self.away.saturating_add(1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEventKind {
    Goal {
        side: TeamSide,
        scorer: Option<PlayerId>,
    },
    Kickoff {
        side: TeamSide,
    },
    HalfTime,
    FullTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MatchEvent {
    pub tick: Tick,
    pub minute: u32,
    pub kind: MatchEventKind,
}

/// Everything needed to field one team.
#[derive(Clone, Debug)]
pub struct TeamSheet {
    pub name: String,
    pub formation: Formation,
    pub skills: Vec<PlayerSkills>,
}

impl TeamSheet {
    /// An average squad in a 4-4-2, with ratings varied by the given RNG.
    pub fn generated(name: impl Into<String>, rng: &mut MatchRng) -> Self {
        let skills = (0..SQUAD_SIZE)
            .map(|_| {
                let spread = |rng: &mut MatchRng| 45 + (rng.index(40) as u8);
                PlayerSkills {
                    pace: spread(rng),
                    acceleration: spread(rng),
                    agility: spread(rng),
                    balance: spread(rng),
                    technique: spread(rng),
                    awareness: spread(rng),
                }
            })
            .collect();
        Self {
            name: name.into(),
            formation: Formation::four_four_two(),
            skills,
        }
    }
}

#[derive(Debug)]
pub struct MatchWorld {
    pub field: Field,
    pub teams: [Team; 2],
    pub players: Vec<Player>,
    pub ball: Ball,
    pub rng: MatchRng,
    pub score: Score,
    pub phase: MatchPhase,
    pub log: EventLog,
    pub events: Vec<MatchEvent>,
    pub stats: MatchStats,
    /// Last player to play the ball; credited with goals.
    pub last_toucher: Option<PlayerId>,
}

impl MatchWorld {
    pub fn new(home: TeamSheet, away: TeamSheet, seed: u64) -> Result<Self> {
        for sheet in [&home, &away] {
            if sheet.skills.len() != SQUAD_SIZE {
                return Err(SimError::InvalidTeamSize {
                    expected: SQUAD_SIZE,
                    found: sheet.skills.len(),
                });
            }
        }

        let field = Field::default();
        let mut players = Vec::with_capacity(2 * SQUAD_SIZE);
        let mut teams: [Team; 2] = [
            Team::new(home.name.clone(), TeamSide::Home),
            Team::new(away.name.clone(), TeamSide::Away),
        ];
        teams[0].formation = home.formation.clone();
        teams[1].formation = away.formation.clone();

        for (side, sheet) in [(TeamSide::Home, &home), (TeamSide::Away, &away)] {
            for (slot, skills) in sheet.skills.iter().enumerate() {
                let id = PlayerId(players.len());
                let anchor = teams[side.index()].formation.anchor_m(slot, side, &field);
                players.push(Player::new(id, side, slot, anchor, *skills));
                teams[side.index()].roster.push(id);
            }
        }

        let ball = Ball::at(field.center());
        Ok(Self {
            field,
            teams,
            players,
            ball,
            rng: MatchRng::new(seed),
            score: Score::default(),
            phase: MatchPhase::FirstHalf,
            log: EventLog::new(),
            events: Vec::new(),
            stats: MatchStats::default(),
            last_toucher: None,
        })
    }

    /// Two generated average squads; handy for tests and the CLI.
    pub fn with_generated_squads(
        home_name: impl Into<String>,
        away_name: impl Into<String>,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = MatchRng::new(seed);
        let home = TeamSheet::generated(home_name, &mut rng);
        let away = TeamSheet::generated(away_name, &mut rng);
        Self::new(home, away, seed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    #[inline]
    pub fn team(&self, side: TeamSide) -> &Team {
        &self.teams[side.index()]
    }

    pub fn side_players(&self, side: TeamSide) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.context.side == side)
    }

    /// Closest player of `side` to the ball.
    pub fn nearest_to_ball(&self, side: TeamSide) -> Option<PlayerId> {
        self.side_players(side)
            .min_by(|a, b| {
                let da = distance(a.body.position, self.ball.position);
                let db = distance(b.body.position, self.ball.position);
                da.total_cmp(&db)
            })
            .map(|p| p.id)
    }

    /// Whether the player is close enough (and the ball low enough) to
    /// play it.
    pub fn can_reach_ball(&self, id: PlayerId) -> bool {
        let player = self.player(id);
        distance(player.body.position, self.ball.position) <= ball_params::CONTROL_RADIUS_M
            && self.ball.height <= ball_params::CONTROL_HEIGHT_M
    }

    #[inline]
    pub fn minute(tick: Tick) -> u32 {
        tick / clock::MS_PER_MINUTE
    }

    // =========================================================================
    // Mutations driven by the match engine
    // =========================================================================

    /// Accelerate the ball from a player's kick. The caller re-arms the
    /// ball physics chain.
    pub fn apply_kick(&mut self, id: PlayerId, kick: &KickIntent, tick: Tick) {
        let side = self.player(id).context.side;
        let from_goal = distance(
            self.player(id).body.position,
            self.field.goal_center(side.opponent()),
        );
        self.stats.record_touch(side);
        if from_goal <= play::SHOOTING_RANGE_M {
            self.stats.record_shot(side);
        }

        ball_physics::apply_kick(&mut self.ball, kick, tick);
        self.last_toucher = Some(id);
    }

    pub fn record_goal(&mut self, tick: Tick, side: TeamSide) {
        self.score.add_goal(side);
        self.stats.record_goal(side);
        let scorer = self
            .last_toucher
            .filter(|id| self.player(*id).context.side == side);
        self.events.push(MatchEvent {
            tick,
            minute: Self::minute(tick),
            kind: MatchEventKind::Goal { side, scorer },
        });
        self.log.info(
            tick,
            format!(
                "GOAL {} ({}-{}), minute {}",
                self.team(side).name,
                self.score.home,
                self.score.away,
                Self::minute(tick)
            ),
        );
    }

    /// Reset for a kickoff: everyone to their anchors, ball dead on the
    /// centre spot, the kicking side's forward stepped up to take it.
    pub fn setup_kickoff(&mut self, side: TeamSide, tick: Tick) {
        let center = self.field.center();
        self.ball.place(center, tick);
        self.last_toucher = None;

        for player in &mut self.players {
            player.body.position = player.context.anchor;
            player.body.velocity = (0.0, 0.0);
            player.body.facing = (player.context.side.attack_sign(), 0.0);
            player.intentions.clear();
        }

        // The kicking side's last roster slot takes the kickoff.
        if let Some(&taker) = self.teams[side.index()].roster.last() {
            let spot = (center.0 - side.attack_sign() * 1.0, center.1);
            self.player_mut(taker).body.position = spot;
        }

        self.events.push(MatchEvent {
            tick,
            minute: Self::minute(tick),
            kind: MatchEventKind::Kickoff { side },
        });
        self.log
            .info(tick, format!("kickoff: {}", self.team(side).name));
    }

    /// Goal events in firing order.
    pub fn goals(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, MatchEventKind::Goal { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_fields_two_full_squads() {
        let world = MatchWorld::with_generated_squads("H", "A", 1).unwrap();
        assert_eq!(world.players.len(), 22);
        assert_eq!(world.team(TeamSide::Home).roster.len(), SQUAD_SIZE);
        assert_eq!(world.team(TeamSide::Away).roster.len(), SQUAD_SIZE);
        // Arena ids are positional.
        for (idx, player) in world.players.iter().enumerate() {
            assert_eq!(player.id.index(), idx);
        }
    }

    #[test]
    fn test_short_squad_is_rejected() {
        let mut rng = MatchRng::new(1);
        let mut home = TeamSheet::generated("H", &mut rng);
        home.skills.truncate(9);
        let away = TeamSheet::generated("A", &mut rng);
        assert!(matches!(
            MatchWorld::new(home, away, 1),
            Err(SimError::InvalidTeamSize {
                expected: 11,
                found: 9
            })
        ));
    }

    #[test]
    fn test_same_seed_generates_same_squads() {
        let a = MatchWorld::with_generated_squads("H", "A", 9).unwrap();
        let b = MatchWorld::with_generated_squads("H", "A", 9).unwrap();
        for (pa, pb) in a.players.iter().zip(&b.players) {
            assert_eq!(pa.skills.pace, pb.skills.pace);
            assert_eq!(pa.skills.awareness, pb.skills.awareness);
        }
    }

    #[test]
    fn test_nearest_to_ball_picks_the_kickoff_taker() {
        let mut world = MatchWorld::with_generated_squads("H", "A", 3).unwrap();
        world.setup_kickoff(TeamSide::Home, 1);
        let nearest = world.nearest_to_ball(TeamSide::Home).unwrap();
        let expected = *world.team(TeamSide::Home).roster.last().unwrap();
        assert_eq!(nearest, expected);
        assert!(world.can_reach_ball(nearest));
    }

    #[test]
    fn test_goal_records_score_event_and_log() {
        let mut world = MatchWorld::with_generated_squads("H", "A", 3).unwrap();
        let scorer = world.team(TeamSide::Home).roster[9];
        world.apply_kick(
            scorer,
            &KickIntent {
                direction: (1.0, 0.0),
                power: 0.9,
                lift: 0.0,
                curve: 0.0,
            },
            100,
        );
        world.record_goal(150, TeamSide::Home);

        assert_eq!(world.score, Score { home: 1, away: 0 });
        let goals: Vec<_> = world.goals().collect();
        assert_eq!(goals.len(), 1);
        assert!(matches!(
            goals[0].kind,
            MatchEventKind::Goal {
                side: TeamSide::Home,
                scorer: Some(id)
            } if id == scorer
        ));
        assert!(!world.log.is_empty());
    }

    #[test]
    fn test_own_goal_is_not_credited() {
        let mut world = MatchWorld::with_generated_squads("H", "A", 3).unwrap();
        let away_player = world.team(TeamSide::Away).roster[4];
        world.apply_kick(
            away_player,
            &KickIntent {
                direction: (-1.0, 0.0),
                power: 0.9,
                lift: 0.0,
                curve: 0.0,
            },
            100,
        );
        // Away put it into their own net: home scores, nobody credited.
        world.record_goal(150, TeamSide::Home);
        let goals: Vec<_> = world.goals().collect();
        assert!(matches!(
            goals[0].kind,
            MatchEventKind::Goal { side: TeamSide::Home, scorer: None }
        ));
    }

    #[test]
    fn test_kickoff_resets_positions_and_ball() {
        let mut world = MatchWorld::with_generated_squads("H", "A", 3).unwrap();
        // Scatter everyone.
        for player in &mut world.players {
            player.body.position = (1.0, 1.0);
            player.body.velocity = (5.0, 5.0);
        }
        world.ball.velocity = (20.0, 0.0);

        world.setup_kickoff(TeamSide::Away, 2_700_000);

        assert_eq!(world.ball.position, world.field.center());
        assert_eq!(world.ball.speed(), 0.0);
        for player in &world.players {
            assert_eq!(player.body.velocity, (0.0, 0.0));
        }
    }
}
