//! Mini-league tie-break for participants level on points.
//!
//! Only used when a host opts into [`TieBreakMode::MiniTable`](super::TieBreakMode::MiniTable).
//! A group level on points is ordered by a league built from the matches
//! among its members. Members still level on that league are re-ordered by a
//! league of just their own matches, as long as that shrinks the group; what
//! remains falls through to the overall criteria.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::compare_overall;
use crate::models::{Fixture, HeadToHead, ParticipantId, StandingsRow};

pub(crate) fn rank_by_mini_table(
    mut rows: Vec<StandingsRow>,
    fixtures: &[Fixture],
) -> Vec<StandingsRow> {
    rows.sort_by(|a, b| b.points.cmp(&a.points));

    split_runs(rows, |a, b| a.points == b.points)
        .into_iter()
        .flat_map(|group| order_group(group, fixtures))
        .collect()
}

fn order_group(mut group: Vec<StandingsRow>, fixtures: &[Fixture]) -> Vec<StandingsRow> {
    if group.len() < 2 {
        return group;
    }

    let members: HashSet<ParticipantId> = group.iter().map(|r| r.participant_id).collect();
    let table = mini_league(&members, fixtures);
    let record = |row: &StandingsRow| {
        table
            .get(&row.participant_id)
            .copied()
            .unwrap_or_default()
    };

    debug!(
        "Mini-table over {} participants on {} points",
        group.len(),
        group[0].points
    );

    group.sort_by(|a, b| {
        compare_records(&record(a), &record(b)).then_with(|| compare_overall(a, b))
    });

    let size = group.len();
    split_runs(group, |a, b| compare_records(&record(a), &record(b)) == Ordering::Equal)
        .into_iter()
        .flat_map(|run| {
            if run.len() > 1 && run.len() < size {
                order_group(run, fixtures)
            } else {
                run
            }
        })
        .collect()
}

/// Records from played matches where both sides belong to `members`.
fn mini_league(
    members: &HashSet<ParticipantId>,
    fixtures: &[Fixture],
) -> HashMap<ParticipantId, HeadToHead> {
    let mut table: HashMap<ParticipantId, HeadToHead> = HashMap::new();

    for fixture in fixtures {
        let Some(result) = &fixture.result else {
            continue;
        };
        if fixture.home_id == fixture.away_id
            || !members.contains(&fixture.home_id)
            || !members.contains(&fixture.away_id)
        {
            continue;
        }

        table
            .entry(fixture.home_id)
            .or_default()
            .add_match(result.home_goals, result.away_goals);
        table
            .entry(fixture.away_id)
            .or_default()
            .add_match(result.away_goals, result.home_goals);
    }

    table
}

fn compare_records(a: &HeadToHead, b: &HeadToHead) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
        .then(b.goals_for.cmp(&a.goals_for))
}

/// Split a sorted vector into maximal runs of adjacent equal elements.
fn split_runs<T>(items: Vec<T>, same: impl Fn(&T, &T) -> bool) -> Vec<Vec<T>> {
    let mut runs: Vec<Vec<T>> = Vec::new();
    for item in items {
        if let Some(run) = runs.last_mut() {
            if run.last().is_some_and(|last| same(last, &item)) {
                run.push(item);
                continue;
            }
        }
        runs.push(vec![item]);
    }
    runs
}
