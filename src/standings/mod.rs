//! Standings ranking engine.
//!
//! Builds the league table from the participants and the fixtures recorded so
//! far. Rows are ordered by, first difference wins:
//! 1. points
//! 2. head-to-head between the two rows being compared (points, goal
//!    difference, goals for)
//! 3. overall goal difference
//! 4. goals for
//! 5. goals against (fewer is better)
//! 6. disciplinary score (fewer is better)
//! 7. name
//!
//! Head-to-head is evaluated for each pair as the sort compares it, not as a
//! mini-league of everyone level on points. With three or more teams level on
//! points and a cycle in their direct results the comparator is not
//! transitive, and the order is whatever the merge sort's comparisons yield.
//! Hosts wanting a total order can opt into [`TieBreakMode::MiniTable`].

mod mini_table;
mod sort;

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Fixture, HeadToHead, Participant, ParticipantId, StandingsRow};

/// How participants level on points are separated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakMode {
    /// Head-to-head between each compared pair
    #[default]
    Pairwise,
    /// Mini-league among all participants level on points, applied recursively
    MiniTable,
}

/// Computes ordered standings. Stateless; every call re-derives the table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandingsEngine {
    mode: TieBreakMode,
}

impl StandingsEngine {
    pub fn new(mode: TieBreakMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> TieBreakMode {
        self.mode
    }

    /// Rank `participants` using the played results in `fixtures`.
    pub fn rank(&self, participants: &[Participant], fixtures: &[Fixture]) -> Vec<StandingsRow> {
        let rows = aggregate(participants, fixtures);

        let mut ranked = match self.mode {
            TieBreakMode::Pairwise => sort::merge_sort_by(
                rows,
                &mut |a: &StandingsRow, b: &StandingsRow| compare_pairwise(a, b, fixtures),
            ),
            TieBreakMode::MiniTable => mini_table::rank_by_mini_table(rows, fixtures),
        };

        for (i, row) in ranked.iter_mut().enumerate() {
            row.rank = i as u32 + 1;
        }

        debug!(
            "Ranked {} participants from {} played fixtures ({:?})",
            ranked.len(),
            fixtures.iter().filter(|f| f.is_played()).count(),
            self.mode
        );

        ranked
    }
}

/// Rank with the default pairwise head-to-head policy.
pub fn rank(participants: &[Participant], fixtures: &[Fixture]) -> Vec<StandingsRow> {
    StandingsEngine::default().rank(participants, fixtures)
}

/// One unranked row per participant, in roster order, totalled over played fixtures.
pub fn aggregate(participants: &[Participant], fixtures: &[Fixture]) -> Vec<StandingsRow> {
    let mut index: HashMap<ParticipantId, usize> = HashMap::with_capacity(participants.len());
    for (i, participant) in participants.iter().enumerate() {
        if index.contains_key(&participant.id) {
            warn!(
                "Duplicate participant id {} ({}); results go to the first entry",
                participant.id, participant.name
            );
            continue;
        }
        index.insert(participant.id, i);
    }

    let mut rows: Vec<StandingsRow> = participants
        .iter()
        .map(|p| StandingsRow::new(p.id, p.name.clone()))
        .collect();

    for fixture in fixtures {
        let Some(result) = &fixture.result else {
            continue;
        };

        if fixture.home_id == fixture.away_id {
            warn!(
                "Skipping fixture {} where participant {} plays itself",
                fixture.id, fixture.home_id
            );
            continue;
        }

        let (Some(&home), Some(&away)) = (index.get(&fixture.home_id), index.get(&fixture.away_id))
        else {
            warn!(
                "Skipping fixture {} with unknown participant ({} vs {})",
                fixture.id, fixture.home_id, fixture.away_id
            );
            continue;
        };

        rows[home].add_match(result.home_goals, result.away_goals, &result.home);
        rows[away].add_match(result.away_goals, result.home_goals, &result.away);
    }

    for row in &mut rows {
        row.finalize();
    }

    rows
}

/// Records of `a` and `b` restricted to their direct meetings, both legs.
pub fn head_to_head(
    a: ParticipantId,
    b: ParticipantId,
    fixtures: &[Fixture],
) -> (HeadToHead, HeadToHead) {
    let mut stats_a = HeadToHead::default();
    let mut stats_b = HeadToHead::default();

    for fixture in fixtures.iter().filter(|f| f.is_between(a, b)) {
        let Some(result) = &fixture.result else {
            continue;
        };

        if fixture.home_id == a {
            stats_a.add_match(result.home_goals, result.away_goals);
            stats_b.add_match(result.away_goals, result.home_goals);
        } else {
            stats_a.add_match(result.away_goals, result.home_goals);
            stats_b.add_match(result.home_goals, result.away_goals);
        }
    }

    (stats_a, stats_b)
}

/// Full comparator: points, then head-to-head, then the overall criteria.
pub fn compare_pairwise(a: &StandingsRow, b: &StandingsRow, fixtures: &[Fixture]) -> Ordering {
    b.points.cmp(&a.points).then_with(|| {
        let (h2h_a, h2h_b) = head_to_head(a.participant_id, b.participant_id, fixtures);
        h2h_b
            .points
            .cmp(&h2h_a.points)
            .then(h2h_b.goal_difference.cmp(&h2h_a.goal_difference))
            .then(h2h_b.goals_for.cmp(&h2h_a.goals_for))
            .then_with(|| compare_overall(a, b))
    })
}

/// Criteria 3 to 7. Names compare case-insensitively first, then byte-wise;
/// participant id settles rows identical down to the name.
pub(crate) fn compare_overall(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.goal_difference
        .cmp(&a.goal_difference)
        .then(b.goals_for.cmp(&a.goals_for))
        .then(a.goals_against.cmp(&b.goals_against))
        .then(a.disciplinary_score.cmp(&b.disciplinary_score))
        .then_with(|| compare_names(&a.name, &b.name))
        .then(a.participant_id.cmp(&b.participant_id))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
