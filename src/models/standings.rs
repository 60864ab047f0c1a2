//! Derived standings models.

use serde::{Deserialize, Serialize};

use super::{Discipline, ParticipantId};

/// Points for a win.
pub const WIN_POINTS: u32 = 3;

/// Points for a draw.
pub const DRAW_POINTS: u32 = 1;

/// One line of the league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// Final position, 1 = top of the table
    pub rank: u32,

    pub participant_id: ParticipantId,

    pub name: String,

    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,

    pub goals_for: u32,
    pub goals_against: u32,

    /// `goals_for - goals_against`
    pub goal_difference: i64,

    pub points: u32,

    /// Accumulated cautions and dismissals
    pub discipline: Discipline,

    /// Weighted fair-play score (lower is better)
    pub disciplinary_score: u32,
}

impl StandingsRow {
    /// Empty row for a participant that has not played.
    pub fn new(participant_id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            rank: 0,
            participant_id,
            name: name.into(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            discipline: Discipline::default(),
            disciplinary_score: 0,
        }
    }

    /// Totals saturate at `u32::MAX` rather than wrapping.
    pub(crate) fn add_match(&mut self, scored: u32, conceded: u32, cards: &Discipline) {
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        self.discipline.accumulate(cards);

        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.wins = self.wins.saturating_add(1);
                self.points = self.points.saturating_add(WIN_POINTS);
            }
            std::cmp::Ordering::Less => self.losses = self.losses.saturating_add(1),
            std::cmp::Ordering::Equal => {
                self.draws = self.draws.saturating_add(1);
                self.points = self.points.saturating_add(DRAW_POINTS);
            }
        }
    }

    /// Fill in the fields derived from the running totals.
    pub(crate) fn finalize(&mut self) {
        self.goal_difference = self.goals_for as i64 - self.goals_against as i64;
        self.disciplinary_score = self.discipline.score();
    }
}

/// One side's record restricted to the direct meetings with a single opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

impl HeadToHead {
    pub(crate) fn add_match(&mut self, scored: u32, conceded: u32) {
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        self.points = self.points.saturating_add(match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => WIN_POINTS,
            std::cmp::Ordering::Equal => DRAW_POINTS,
            std::cmp::Ordering::Less => 0,
        });
        self.goal_difference = self.goals_for as i64 - self.goals_against as i64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_add_match() {
        let mut row = StandingsRow::new(0, "Lions");
        row.add_match(2, 0, &Discipline::new(1, 0, 0));
        row.add_match(1, 1, &Discipline::default());
        row.add_match(0, 3, &Discipline::new(0, 0, 1));
        row.finalize();

        assert_eq!((row.played, row.wins, row.draws, row.losses), (3, 1, 1, 1));
        assert_eq!(row.points, 4);
        assert_eq!(row.goals_for, 3);
        assert_eq!(row.goals_against, 4);
        assert_eq!(row.goal_difference, -1);
        assert_eq!(row.disciplinary_score, 5);
    }

    #[test]
    fn test_row_totals_saturate() {
        let mut row = StandingsRow::new(0, "Lions");
        row.add_match(u32::MAX, 0, &Discipline::new(0, 0, u32::MAX));
        row.add_match(1, 0, &Discipline::new(0, 0, 1));
        row.finalize();

        assert_eq!(row.goals_for, u32::MAX);
        assert_eq!(row.goal_difference, u32::MAX as i64);
        assert_eq!(row.disciplinary_score, u32::MAX);
        assert_eq!(row.points, 6);
    }

    #[test]
    fn test_head_to_head_add_match() {
        let mut h2h = HeadToHead::default();
        h2h.add_match(2, 0);
        h2h.add_match(0, 1);
        assert_eq!(h2h.points, 3);
        assert_eq!(h2h.goals_for, 2);
        assert_eq!(h2h.goals_against, 1);
        assert_eq!(h2h.goal_difference, 1);
    }
}
