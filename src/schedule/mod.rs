//! Double round-robin fixture generation.
//!
//! Leg 1 is built with the circle method: slot 0 stays put while every other
//! slot moves one place to the right each round, wrapping around. Odd rosters
//! get a bye slot, and any pairing that touches it is dropped. Leg 2 mirrors
//! leg 1 with home and away swapped, starting in the round after leg 1 ends.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LeagueError;
use crate::models::{Fixture, Leg, Participant, ParticipantId};

/// How the roster is ordered before the circle method runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seeding {
    /// Random permutation from the thread-local RNG
    #[default]
    Shuffle,
    /// Random permutation from a seeded RNG, reproducible across runs
    Seeded(u64),
    /// Keep the roster order exactly as given
    AsGiven,
}

/// Builds the full home-and-away fixture list for a roster.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleGenerator {
    seeding: Seeding,
}

impl ScheduleGenerator {
    pub fn new(seeding: Seeding) -> Self {
        Self { seeding }
    }

    pub fn seeding(&self) -> Seeding {
        self.seeding
    }

    /// Generate both legs for `participants` using the configured seeding.
    pub fn generate(&self, participants: &[Participant]) -> Result<Vec<Fixture>, LeagueError> {
        match self.seeding {
            Seeding::Shuffle => Self::generate_with_rng(participants, &mut rand::thread_rng()),
            Seeding::Seeded(seed) => {
                Self::generate_with_rng(participants, &mut StdRng::seed_from_u64(seed))
            }
            Seeding::AsGiven => {
                let order = validated_ids(participants)?;
                Ok(build_schedule(order))
            }
        }
    }

    /// Generate both legs, permuting the roster with the supplied RNG first.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        participants: &[Participant],
        rng: &mut R,
    ) -> Result<Vec<Fixture>, LeagueError> {
        let mut order = validated_ids(participants)?;
        order.shuffle(rng);
        Ok(build_schedule(order))
    }
}

/// Number of rounds in one leg for a roster of `count` participants.
pub fn rounds_per_leg(count: usize) -> u32 {
    if count < 2 {
        return 0;
    }
    (count + count % 2 - 1) as u32
}

/// Fixtures scheduled for a given round.
pub fn fixtures_in_round(fixtures: &[Fixture], round: u32) -> impl Iterator<Item = &Fixture> {
    fixtures.iter().filter(move |f| f.round == round)
}

/// Fixtures a participant takes part in, home or away.
pub fn fixtures_for(
    fixtures: &[Fixture],
    participant: ParticipantId,
) -> impl Iterator<Item = &Fixture> {
    fixtures.iter().filter(move |f| f.involves(participant))
}

fn validated_ids(participants: &[Participant]) -> Result<Vec<ParticipantId>, LeagueError> {
    if participants.len() < 2 {
        return Err(LeagueError::invalid(format!(
            "a schedule needs at least 2 participants, got {}",
            participants.len()
        )));
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if !seen.insert(p.id) {
            return Err(LeagueError::invalid(format!(
                "participant id {} appears more than once",
                p.id
            )));
        }
    }

    Ok(participants.iter().map(|p| p.id).collect())
}

/// Pairings for each round of one leg, in `(home, away)` order.
fn circle_rounds(order: Vec<ParticipantId>) -> Vec<Vec<(ParticipantId, ParticipantId)>> {
    // None is the bye slot.
    let mut slots: Vec<Option<ParticipantId>> = order.into_iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    let rounds = n - 1;
    let half = n / 2;
    let mut schedule = Vec::with_capacity(rounds);

    for _ in 0..rounds {
        let pairs = (0..half)
            .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
                (Some(home), Some(away)) => Some((home, away)),
                _ => None,
            })
            .collect();
        schedule.push(pairs);

        slots[1..].rotate_right(1);
    }

    schedule
}

fn build_schedule(order: Vec<ParticipantId>) -> Vec<Fixture> {
    debug!("Building schedule for seeded order {:?}", order);

    let rounds = circle_rounds(order);
    let leg_rounds = rounds.len() as u32;

    let first_leg: Vec<Fixture> = rounds
        .iter()
        .enumerate()
        .flat_map(|(r, pairs)| {
            pairs
                .iter()
                .map(move |&(home, away)| Fixture::new(Leg::First, r as u32 + 1, home, away))
        })
        .collect();

    let second_leg: Vec<Fixture> = first_leg
        .iter()
        .map(|f| Fixture::new(Leg::Second, f.round + leg_rounds, f.away_id, f.home_id))
        .collect();

    info!(
        "Generated {} fixtures over {} rounds ({} per leg)",
        first_leg.len() + second_leg.len(),
        leg_rounds * 2,
        leg_rounds
    );

    let mut fixtures = first_leg;
    fixtures.extend(second_leg);
    fixtures
}
