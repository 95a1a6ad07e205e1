//! Data structures for the fixtures engine: participants, events, fixtures, errors.

mod error;
mod event;
mod fixture;
mod participant;

pub use error::{parse_id, FixtureError};
pub use event::{Event, EventId, EventKind, MatchFormat, Tournament, TournamentId};
pub use fixture::{Fixture, FixtureId, FixtureStatus, FixtureUpdate, Phase, Scope, Side};
pub use participant::{Member, Participant, ParticipantEntry, ParticipantId, ParticipantSummary};
