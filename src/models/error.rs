//! Errors returned by fixture generation, result updates and queries.

use uuid::Uuid;

/// Errors that can occur during fixture operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FixtureError {
    /// Identifier is not a valid UUID (rejected before any lookup).
    InvalidId(String),
    /// Request body is not the expected JSON shape.
    InvalidBody(String),
    TournamentNotFound(Uuid),
    EventNotFound(Uuid),
    FixtureNotFound(Uuid),
    /// Fewer than 2 entrants to generate fixtures from.
    NotEnoughParticipants { found: usize },
    /// Fewer than 2 participants qualified out of the round-robin phase.
    NotEnoughQualifiers { found: usize },
    /// Knockout-from-standings needs an event that combines round-robin and knockout.
    NotHybridEvent,
    /// Knockout-from-standings was requested without an event.
    EventRequired,
    NoRoundRobinFixtures,
    NoResultsEntered,
    /// Round-robin fixtures already exist for a hybrid event and `force` was not set.
    AlreadyGenerated,
    /// A fixture already occupies this slot in the same tournament/event/phase.
    DuplicateSlot { round: u32, match_index: u32 },
    /// Store could not be read or written (e.g. poisoned lock).
    Storage(String),
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::InvalidId(raw) => write!(f, "Invalid id: {}", raw),
            FixtureError::InvalidBody(reason) => write!(f, "Invalid request body: {}", reason),
            FixtureError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            FixtureError::EventNotFound(_) => write!(f, "Event not found"),
            FixtureError::FixtureNotFound(_) => write!(f, "Fixture not found"),
            FixtureError::NotEnoughParticipants { found } => {
                write!(f, "Need at least 2 participants to generate fixtures, got {}", found)
            }
            FixtureError::NotEnoughQualifiers { found } => {
                write!(f, "Need at least 2 qualified teams, got {}", found)
            }
            FixtureError::NotHybridEvent => write!(f, "Event is not round-robin + knockout"),
            FixtureError::EventRequired => write!(f, "An event id is required"),
            FixtureError::NoRoundRobinFixtures => write!(f, "No round-robin fixtures found"),
            FixtureError::NoResultsEntered => write!(f, "No round-robin results entered yet"),
            FixtureError::AlreadyGenerated => {
                write!(f, "Round-robin fixtures already exist (use force to regenerate)")
            }
            FixtureError::DuplicateSlot { round, match_index } => {
                write!(f, "Fixture slot round {} match {} is already taken", round, match_index)
            }
            FixtureError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for FixtureError {}

/// Parse a client-supplied identifier.
pub fn parse_id(raw: &str) -> Result<Uuid, FixtureError> {
    Uuid::parse_str(raw.trim()).map_err(|_| FixtureError::InvalidId(raw.to_string()))
}
