//! Fixture (one scheduled match), its phase/status, and the partial result update.

use crate::models::event::{EventId, TournamentId};
use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Segment of an event's fixture set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "rr")]
    RoundRobin,
    #[serde(rename = "ko")]
    Knockout,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
}

/// Which slot of a fixture a participant occupies.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// The (tournament, event) pair that fixture generation and mutation are restricted to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub tournament_id: TournamentId,
    pub event_id: Option<EventId>,
}

impl Scope {
    pub fn new(tournament_id: TournamentId, event_id: Option<EventId>) -> Self {
        Self {
            tournament_id,
            event_id,
        }
    }

    /// True if the fixture belongs to exactly this tournament and event.
    pub fn contains(&self, fixture: &Fixture) -> bool {
        fixture.tournament_id == self.tournament_id && fixture.event_id == self.event_id
    }
}

/// A single match in a round-robin schedule or knockout bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub tournament_id: TournamentId,
    pub event_id: Option<EventId>,
    /// Zero-based, dense within (tournament, event, phase).
    pub round: u32,
    pub round_name: String,
    /// Position within the round. Knockout parent is `(round + 1, match_index / 2)`.
    pub match_index: u32,
    /// None = bye or not yet decided.
    pub team_a: Option<ParticipantId>,
    pub team_b: Option<ParticipantId>,
    /// Legacy records carry no phase; they count as round-robin.
    #[serde(default)]
    pub phase: Option<Phase>,
    #[serde(default)]
    pub status: FixtureStatus,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub winner: Option<ParticipantId>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fixture {
    /// New scheduled fixture with no result.
    pub fn new(
        scope: Scope,
        phase: Phase,
        round: u32,
        round_name: impl Into<String>,
        match_index: u32,
        team_a: Option<ParticipantId>,
        team_b: Option<ParticipantId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tournament_id: scope.tournament_id,
            event_id: scope.event_id,
            round,
            round_name: round_name.into(),
            match_index,
            team_a,
            team_b,
            phase: Some(phase),
            status: FixtureStatus::Scheduled,
            score_a: None,
            score_b: None,
            winner: None,
            scheduled_at: now,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn scope(&self) -> Scope {
        Scope::new(self.tournament_id, self.event_id)
    }

    /// Phase used for filtering: a missing phase reads as round-robin.
    pub fn effective_phase(&self) -> Phase {
        self.phase.unwrap_or(Phase::RoundRobin)
    }

    /// Both scores present.
    pub fn has_result(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    pub fn team(&self, side: Side) -> Option<ParticipantId> {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn set_team(&mut self, side: Side, participant: Option<ParticipantId>) {
        match side {
            Side::A => self.team_a = participant,
            Side::B => self.team_b = participant,
        }
    }
}

/// Partial result update. Only these fields can change after a fixture is generated.
///
/// Scores, winner and notes distinguish an absent field (`None`, left as is) from an explicit
/// `null` (`Some(None)`, cleared), so a wrongly entered result can be retracted.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureUpdate {
    pub status: Option<FixtureStatus>,
    #[serde(deserialize_with = "clearable")]
    pub score_a: Option<Option<u32>>,
    #[serde(deserialize_with = "clearable")]
    pub score_b: Option<Option<u32>>,
    #[serde(deserialize_with = "clearable")]
    pub winner: Option<Option<ParticipantId>>,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "clearable")]
    pub notes: Option<Option<String>>,
}

/// A present field, `null` included, becomes `Some`. Absent fields fall back to the default.
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl FixtureUpdate {
    /// Update carrying a final score.
    pub fn score(score_a: u32, score_b: u32) -> Self {
        Self {
            status: Some(FixtureStatus::Completed),
            score_a: Some(Some(score_a)),
            score_b: Some(Some(score_b)),
            ..Self::default()
        }
    }

    /// Update that clears the scores and winner and puts the fixture back on the schedule.
    pub fn retract() -> Self {
        Self {
            status: Some(FixtureStatus::Scheduled),
            score_a: Some(None),
            score_b: Some(None),
            winner: Some(None),
            ..Self::default()
        }
    }
}
