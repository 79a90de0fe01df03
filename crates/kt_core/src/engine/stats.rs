//! Per-team match statistics.
//!
//! Counters updated by the match engine as play unfolds. Possession is
//! derived from touch share: every kick counts as a touch for the kicking
//! side.

use serde::{Deserialize, Serialize};

use crate::engine::team::TeamSide;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub touches: u32,
    pub shots: u32,
    pub goals: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub home: TeamStats,
    pub away: TeamStats,
}

impl MatchStats {
    #[inline]
    pub fn side(&self, side: TeamSide) -> &TeamStats {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    #[inline]
    fn side_mut(&mut self, side: TeamSide) -> &mut TeamStats {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn record_touch(&mut self, side: TeamSide) {
        self.side_mut(side).touches += 1;
    }

    pub fn record_shot(&mut self, side: TeamSide) {
        self.side_mut(side).shots += 1;
    }

    pub fn record_goal(&mut self, side: TeamSide) {
        let stats = self.side_mut(side);
        stats.goals = stats.goals.saturating_add(1);
    }

    /// Touch-share possession percentage for `side`. An untouched match
    /// reads as an even 50.
    pub fn possession_pct(&self, side: TeamSide) -> f32 {
        let total = self.home.touches + self.away.touches;
        if total == 0 {
            return 50.0;
        }
        100.0 * self.side(side).touches as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate_per_side() {
        let mut stats = MatchStats::default();
        stats.record_touch(TeamSide::Home);
        stats.record_touch(TeamSide::Home);
        stats.record_touch(TeamSide::Away);
        stats.record_shot(TeamSide::Home);
        stats.record_goal(TeamSide::Home);

        assert_eq!(stats.home.touches, 2);
        assert_eq!(stats.away.touches, 1);
        assert_eq!(stats.home.shots, 1);
        assert_eq!(stats.home.goals, 1);
        assert_eq!(stats.away.goals, 0);
    }

    #[test]
    fn test_possession_from_touch_share() {
        let mut stats = MatchStats::default();
        for _ in 0..3 {
            stats.record_touch(TeamSide::Home);
        }
        stats.record_touch(TeamSide::Away);

        assert!((stats.possession_pct(TeamSide::Home) - 75.0).abs() < 1e-4);
        assert!((stats.possession_pct(TeamSide::Away) - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_match_reads_even() {
        let stats = MatchStats::default();
        assert_eq!(stats.possession_pct(TeamSide::Home), 50.0);
        assert_eq!(stats.possession_pct(TeamSide::Away), 50.0);
    }
}
