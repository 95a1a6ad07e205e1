//! Tournament and Event records, and the match format an event is played in.

use crate::models::participant::Participant;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Unique identifier for an event within a tournament.
pub type EventId = Uuid;

/// How an event's fixtures are structured. Parsed from the configured match type string.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchFormat {
    RoundRobin,
    #[default]
    Knockout,
    /// Round-robin group stage feeding a knockout bracket.
    RoundRobinKnockout,
}

impl MatchFormat {
    /// Case-insensitive: anything that names neither "round-robin" variant is knockout.
    pub fn parse(match_type: &str) -> Self {
        let lower = match_type.to_lowercase();
        let round_robin = lower.contains("round-robin");
        let knockout = lower.contains("knockout");
        match (round_robin, knockout) {
            (true, true) => MatchFormat::RoundRobinKnockout,
            (true, false) => MatchFormat::RoundRobin,
            _ => MatchFormat::Knockout,
        }
    }

    pub fn has_round_robin(self) -> bool {
        matches!(self, MatchFormat::RoundRobin | MatchFormat::RoundRobinKnockout)
    }

    pub fn is_hybrid(self) -> bool {
        self == MatchFormat::RoundRobinKnockout
    }
}

/// Whether an event is entered by single players or by pairs/groups.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Individual,
    Group,
}

/// An event (e.g. "Men's Doubles") inside a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub tournament_id: TournamentId,
    pub name: String,
    /// Free-form match type as configured, e.g. "Round-Robin-Knockout".
    pub match_type: String,
    pub kind: EventKind,
}

impl Event {
    pub fn new(
        tournament_id: TournamentId,
        name: impl Into<String>,
        match_type: impl Into<String>,
        kind: EventKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            match_type: match_type.into(),
            kind,
        }
    }

    pub fn format(&self) -> MatchFormat {
        MatchFormat::parse(&self.match_type)
    }
}

/// A tournament and its directly attached teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub teams: Vec<Participant>,
}

impl Tournament {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams: Vec::new(),
        }
    }

    /// Create a tournament with one team participant per name.
    pub fn with_teams<I, S>(name: impl Into<String>, team_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            teams: team_names.into_iter().map(Participant::team).collect(),
            ..Self::new(name)
        }
    }
}
