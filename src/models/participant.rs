//! Participant records: individuals, pairs and tournament-level teams.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant (used in fixtures and standings).
pub type ParticipantId = Uuid;

/// One member of a pair entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
        }
    }
}

/// What kind of entrant a participant is. Each variant derives its own display name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParticipantEntry {
    /// Single player entered in an individual event.
    Individual { name: String },
    /// Two players entered together in a group/pair event.
    Pair {
        team_name: String,
        members: [Member; 2],
    },
    /// Team attached directly to the tournament (fallback when an event has no entrants).
    Team { name: String },
}

impl ParticipantEntry {
    /// Name shown in fixture lists. Pairs read as "A & B" when both members are named.
    pub fn display_name(&self) -> String {
        match self {
            ParticipantEntry::Individual { name } | ParticipantEntry::Team { name } => name.clone(),
            ParticipantEntry::Pair { team_name, members } => {
                let [first, second] = members;
                if first.name.trim().is_empty() || second.name.trim().is_empty() {
                    team_name.clone()
                } else {
                    format!("{} & {}", first.name.trim(), second.name.trim())
                }
            }
        }
    }
}

/// A registered participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    #[serde(flatten)]
    pub entry: ParticipantEntry,
}

impl Participant {
    pub fn new(entry: ParticipantEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            entry,
        }
    }

    pub fn individual(name: impl Into<String>) -> Self {
        Self::new(ParticipantEntry::Individual { name: name.into() })
    }

    pub fn pair(team_name: impl Into<String>, first: Member, second: Member) -> Self {
        Self::new(ParticipantEntry::Pair {
            team_name: team_name.into(),
            members: [first, second],
        })
    }

    pub fn team(name: impl Into<String>) -> Self {
        Self::new(ParticipantEntry::Team { name: name.into() })
    }

    pub fn display_name(&self) -> String {
        self.entry.display_name()
    }

    /// Summary view of this participant (for the teams listing).
    pub fn summary(&self) -> ParticipantSummary {
        ParticipantSummary::from_participant(self)
    }
}

/// Participant as listed by the teams endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
}

impl ParticipantSummary {
    pub fn from_participant(p: &Participant) -> Self {
        let (team_name, members) = match &p.entry {
            ParticipantEntry::Pair { team_name, members } => {
                (Some(team_name.clone()), Some(members.to_vec()))
            }
            _ => (None, None),
        };
        Self {
            id: p.id,
            name: p.display_name(),
            team_name,
            members,
        }
    }
}
