//! Participant model.

use serde::{Deserialize, Serialize};

use super::ParticipantId;

/// A team entered in the league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier
    pub id: ParticipantId,

    /// Display name; not required to be unique
    pub name: String,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Build a roster from entered names, assigning ids `0..n` in order.
    ///
    /// Names are trimmed. A blank name becomes `Team {n}` where `n` is its
    /// 1-based position.
    pub fn roster<S: AsRef<str>>(names: &[S]) -> Vec<Participant> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let trimmed = name.as_ref().trim();
                let name = if trimmed.is_empty() {
                    default_name(i)
                } else {
                    trimmed.to_string()
                };
                Participant::new(i as ParticipantId, name)
            })
            .collect()
    }

    /// Placeholder roster of `count` teams named `Team 1..=count`.
    pub fn placeholder_roster(count: usize) -> Vec<Participant> {
        (0..count)
            .map(|i| Participant::new(i as ParticipantId, default_name(i)))
            .collect()
    }
}

fn default_name(index: usize) -> String {
    format!("Team {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_assigns_sequential_ids() {
        let roster = Participant::roster(&["Lions", "Tigers", "Bears"]);
        let ids: Vec<_> = roster.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(roster[1].name, "Tigers");
    }

    #[test]
    fn test_roster_trims_and_fills_blank_names() {
        let roster = Participant::roster(&["  Lions ", "", "   "]);
        assert_eq!(roster[0].name, "Lions");
        assert_eq!(roster[1].name, "Team 2");
        assert_eq!(roster[2].name, "Team 3");
    }

    #[test]
    fn test_roster_keeps_duplicate_names() {
        let roster = Participant::roster(&["United", "United"]);
        assert_eq!(roster.len(), 2);
        assert_ne!(roster[0].id, roster[1].id);
    }

    #[test]
    fn test_placeholder_roster() {
        let roster = Participant::placeholder_roster(3);
        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Team 1", "Team 2", "Team 3"]);
    }
}
