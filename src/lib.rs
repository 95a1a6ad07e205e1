//! Tournament fixtures engine: library with models, algorithms, storage and the service API.

pub mod config;
pub mod directory;
pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use config::AppConfig;
pub use directory::Directory;
pub use logic::{
    apply_update, apply_winner, compute_standings, generate_knockout, generate_round_robin,
    round_name, seed_bracket, settle_winner, Standing,
};
pub use models::{
    parse_id, Event, EventId, EventKind, Fixture, FixtureError, FixtureId, FixtureStatus,
    FixtureUpdate, MatchFormat, Member, Participant, ParticipantEntry, ParticipantId,
    ParticipantSummary, Phase, Scope, Side, Tournament, TournamentId,
};
pub use service::{FixtureService, GenerateRequest, KnockoutRequest};
pub use store::{EventFilter, FixtureQuery, FixtureStore, MemoryStore, PhaseFilter};
