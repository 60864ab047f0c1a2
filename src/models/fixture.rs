//! Fixture model: one scheduled match between two participants.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{FixtureId, ParticipantId};
use crate::error::LeagueError;

/// Which half of the double round-robin a fixture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    First,
    Second,
}

impl Leg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leg::First => "first",
            Leg::Second => "second",
        }
    }
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cautions and dismissals for one side of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub yellow: u32,
    /// Red card shown for a second caution
    pub second_yellow_red: u32,
    pub direct_red: u32,
}

impl Discipline {
    pub const YELLOW_WEIGHT: u32 = 1;
    pub const SECOND_YELLOW_RED_WEIGHT: u32 = 3;
    pub const DIRECT_RED_WEIGHT: u32 = 4;

    pub fn new(yellow: u32, second_yellow_red: u32, direct_red: u32) -> Self {
        Self {
            yellow,
            second_yellow_red,
            direct_red,
        }
    }

    /// Weighted fair-play score. Lower is better. Saturates at `u32::MAX`.
    pub fn score(&self) -> u32 {
        self.yellow
            .saturating_mul(Self::YELLOW_WEIGHT)
            .saturating_add(self.second_yellow_red.saturating_mul(Self::SECOND_YELLOW_RED_WEIGHT))
            .saturating_add(self.direct_red.saturating_mul(Self::DIRECT_RED_WEIGHT))
    }

    /// All dismissals regardless of how they came about.
    pub fn reds(&self) -> u32 {
        self.second_yellow_red.saturating_add(self.direct_red)
    }

    pub(crate) fn accumulate(&mut self, other: &Discipline) {
        self.yellow = self.yellow.saturating_add(other.yellow);
        self.second_yellow_red = self.second_yellow_red.saturating_add(other.second_yellow_red);
        self.direct_red = self.direct_red.saturating_add(other.direct_red);
    }
}

/// Result of a match from the home side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// A recorded match result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_goals: u32,
    pub away_goals: u32,
    #[serde(default)]
    pub home: Discipline,
    #[serde(default)]
    pub away: Discipline,
}

impl MatchResult {
    /// A result with a clean disciplinary sheet.
    pub fn score(home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_goals,
            away_goals,
            ..Default::default()
        }
    }

    pub fn with_discipline(mut self, home: Discipline, away: Discipline) -> Self {
        self.home = home;
        self.away = away;
        self
    }

    pub fn outcome(&self) -> Outcome {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Largest goal or card count accepted from a [`ResultEntry`].
pub const MAX_ENTRY_VALUE: i64 = 1000;

/// Raw result as typed into a host form, before validation.
///
/// Every field is signed so that a negative entry can be reported instead of
/// silently wrapping. Fields must lie in `0..=MAX_ENTRY_VALUE`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub home_goals: i64,
    pub away_goals: i64,
    pub home_yellow: i64,
    pub away_yellow: i64,
    pub home_second_yellow_red: i64,
    pub away_second_yellow_red: i64,
    pub home_direct_red: i64,
    pub away_direct_red: i64,
}

fn non_negative(field: &str, value: i64) -> Result<u32, LeagueError> {
    if value > MAX_ENTRY_VALUE {
        return Err(LeagueError::invalid(format!(
            "{field} must be at most {MAX_ENTRY_VALUE}, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| {
        LeagueError::invalid(format!(
            "{field} must be a non-negative integer, got {value}"
        ))
    })
}

impl TryFrom<ResultEntry> for MatchResult {
    type Error = LeagueError;

    fn try_from(entry: ResultEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            home_goals: non_negative("home_goals", entry.home_goals)?,
            away_goals: non_negative("away_goals", entry.away_goals)?,
            home: Discipline {
                yellow: non_negative("home_yellow", entry.home_yellow)?,
                second_yellow_red: non_negative(
                    "home_second_yellow_red",
                    entry.home_second_yellow_red,
                )?,
                direct_red: non_negative("home_direct_red", entry.home_direct_red)?,
            },
            away: Discipline {
                yellow: non_negative("away_yellow", entry.away_yellow)?,
                second_yellow_red: non_negative(
                    "away_second_yellow_red",
                    entry.away_second_yellow_red,
                )?,
                direct_red: non_negative("away_direct_red", entry.away_direct_red)?,
            },
        })
    }
}

/// A scheduled match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    /// Unique identifier (derived from leg + round + home + away)
    pub id: FixtureId,

    /// Round number, starting at 1; leg 2 continues after leg 1
    pub round: u32,

    pub leg: Leg,

    pub home_id: ParticipantId,

    pub away_id: ParticipantId,

    /// `None` until the match has been played
    #[serde(default)]
    pub result: Option<MatchResult>,
}

impl Fixture {
    /// Create an unplayed fixture with a generated id.
    pub fn new(leg: Leg, round: u32, home_id: ParticipantId, away_id: ParticipantId) -> Self {
        let id = FixtureId::generate(&[
            leg.as_str(),
            &round.to_string(),
            &home_id.to_string(),
            &away_id.to_string(),
        ]);

        Self {
            id,
            round,
            leg,
            home_id,
            away_id,
            result: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.home_id == participant || self.away_id == participant
    }

    /// Whether this fixture is one of the direct meetings of `a` and `b`.
    pub fn is_between(&self, a: ParticipantId, b: ParticipantId) -> bool {
        (self.home_id == a && self.away_id == b) || (self.home_id == b && self.away_id == a)
    }

    /// Record a result, replacing any earlier one.
    pub fn record(&mut self, result: MatchResult) {
        self.result = Some(result);
    }

    /// Return the fixture to the unplayed state.
    pub fn clear(&mut self) {
        self.result = None;
    }
}

/// Record `result` into the fixture with the given id.
pub fn record_result<'a>(
    fixtures: &'a mut [Fixture],
    id: &FixtureId,
    result: MatchResult,
) -> Result<&'a Fixture, LeagueError> {
    let fixture = fixtures
        .iter_mut()
        .find(|f| &f.id == id)
        .ok_or_else(|| LeagueError::UnknownFixture(id.clone()))?;

    let replaced = fixture.is_played();
    fixture.record(result);
    info!(
        "Recorded {} {}-{} {} in round {}{}",
        fixture.home_id,
        result.home_goals,
        result.away_goals,
        fixture.away_id,
        fixture.round,
        if replaced { " (overwrote earlier result)" } else { "" }
    );

    Ok(fixture)
}

/// Return the fixture with the given id to the unplayed state.
pub fn clear_result<'a>(
    fixtures: &'a mut [Fixture],
    id: &FixtureId,
) -> Result<&'a Fixture, LeagueError> {
    let fixture = fixtures
        .iter_mut()
        .find(|f| &f.id == id)
        .ok_or_else(|| LeagueError::UnknownFixture(id.clone()))?;

    if fixture.is_played() {
        info!(
            "Cleared result of {} vs {} in round {}",
            fixture.home_id, fixture.away_id, fixture.round
        );
    }
    fixture.clear();

    Ok(fixture)
}

/// Validate a raw form entry and record it.
pub fn record_entry<'a>(
    fixtures: &'a mut [Fixture],
    id: &FixtureId,
    entry: ResultEntry,
) -> Result<&'a Fixture, LeagueError> {
    let result = MatchResult::try_from(entry)?;
    record_result(fixtures, id, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discipline_score_weights() {
        assert_eq!(Discipline::new(2, 0, 0).score(), 2);
        assert_eq!(Discipline::new(0, 1, 0).score(), 3);
        assert_eq!(Discipline::new(0, 0, 1).score(), 4);
        assert_eq!(Discipline::new(3, 1, 2).score(), 3 + 3 + 8);
        assert_eq!(Discipline::new(3, 1, 2).reds(), 3);
    }

    #[test]
    fn test_outcome() {
        assert_eq!(MatchResult::score(2, 0).outcome(), Outcome::HomeWin);
        assert_eq!(MatchResult::score(1, 1).outcome(), Outcome::Draw);
        assert_eq!(MatchResult::score(0, 3).outcome(), Outcome::AwayWin);
    }

    #[test]
    fn test_new_fixture_is_unplayed() {
        let fixture = Fixture::new(Leg::First, 1, 0, 1);
        assert!(!fixture.is_played());
        assert!(fixture.is_between(1, 0));
        assert!(fixture.involves(0));
        assert!(!fixture.involves(2));
    }

    #[test]
    fn test_fixture_ids_differ_between_legs() {
        let first = Fixture::new(Leg::First, 1, 0, 1);
        let second = Fixture::new(Leg::Second, 4, 1, 0);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_record_overwrites() {
        let mut fixtures = vec![Fixture::new(Leg::First, 1, 0, 1)];
        let id = fixtures[0].id.clone();

        record_result(&mut fixtures, &id, MatchResult::score(1, 0)).unwrap();
        record_result(&mut fixtures, &id, MatchResult::score(2, 2)).unwrap();

        assert_eq!(fixtures[0].result, Some(MatchResult::score(2, 2)));
    }

    #[test]
    fn test_record_unknown_fixture() {
        let mut fixtures = vec![Fixture::new(Leg::First, 1, 0, 1)];
        let missing = FixtureId::from("missing");
        let err = record_result(&mut fixtures, &missing, MatchResult::score(1, 0)).unwrap_err();
        assert_eq!(err, LeagueError::UnknownFixture(missing));
        assert!(!fixtures[0].is_played());
    }

    #[test]
    fn test_entry_rejects_negative_fields() {
        let entry = ResultEntry {
            home_goals: 1,
            away_yellow: -1,
            ..Default::default()
        };
        let err = MatchResult::try_from(entry).unwrap_err();
        assert!(matches!(err, LeagueError::InvalidInput(ref msg) if msg.contains("away_yellow")));
    }

    #[test]
    fn test_entry_rejects_values_above_cap() {
        let entry = ResultEntry {
            home_direct_red: 2_000_000_000,
            ..Default::default()
        };
        let err = MatchResult::try_from(entry).unwrap_err();
        assert!(
            matches!(err, LeagueError::InvalidInput(ref msg) if msg.contains("home_direct_red"))
        );

        let at_cap = ResultEntry {
            home_goals: MAX_ENTRY_VALUE,
            ..Default::default()
        };
        assert_eq!(MatchResult::try_from(at_cap).unwrap().home_goals, 1000);
    }

    #[test]
    fn test_discipline_score_saturates() {
        let cards = Discipline::new(u32::MAX, 0, u32::MAX);
        assert_eq!(cards.score(), u32::MAX);
        assert_eq!(cards.reds(), u32::MAX);
    }

    #[test]
    fn test_clear_result() {
        let mut fixtures = vec![Fixture::new(Leg::First, 1, 0, 1)];
        let id = fixtures[0].id.clone();
        record_result(&mut fixtures, &id, MatchResult::score(3, 1)).unwrap();

        let cleared = clear_result(&mut fixtures, &id).unwrap();
        assert!(!cleared.is_played());
        assert!(!fixtures[0].is_played());
    }

    #[test]
    fn test_clear_unknown_fixture() {
        let mut fixtures = vec![Fixture::new(Leg::First, 1, 0, 1)];
        let missing = FixtureId::from("missing");
        let err = clear_result(&mut fixtures, &missing).unwrap_err();
        assert_eq!(err, LeagueError::UnknownFixture(missing));
    }

    #[test]
    fn test_record_entry_leaves_fixture_untouched_on_error() {
        let mut fixtures = vec![Fixture::new(Leg::First, 1, 0, 1)];
        let id = fixtures[0].id.clone();
        let entry = ResultEntry {
            home_goals: -2,
            ..Default::default()
        };
        assert!(record_entry(&mut fixtures, &id, entry).is_err());
        assert!(!fixtures[0].is_played());
    }

    #[test]
    fn test_entry_converts_all_fields() {
        let entry = ResultEntry {
            home_goals: 3,
            away_goals: 1,
            home_yellow: 2,
            away_yellow: 4,
            home_second_yellow_red: 0,
            away_second_yellow_red: 1,
            home_direct_red: 1,
            away_direct_red: 0,
        };
        let result = MatchResult::try_from(entry).unwrap();
        assert_eq!(result.home, Discipline::new(2, 0, 1));
        assert_eq!(result.away, Discipline::new(4, 1, 0));
        assert_eq!(result.home_goals, 3);
        assert_eq!(result.away_goals, 1);
    }

    #[test]
    fn test_clear() {
        let mut fixture = Fixture::new(Leg::Second, 5, 2, 3);
        fixture.record(MatchResult::score(0, 0));
        fixture.clear();
        assert!(!fixture.is_played());
    }

    #[test]
    fn test_fixture_serialization() {
        let mut fixture = Fixture::new(Leg::First, 2, 3, 1);
        fixture.record(MatchResult::score(1, 2).with_discipline(
            Discipline::new(1, 0, 0),
            Discipline::default(),
        ));

        let json = serde_json::to_string(&fixture).unwrap();
        assert!(json.contains("\"leg\":\"first\""));
        let back: Fixture = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fixture);
    }
}
