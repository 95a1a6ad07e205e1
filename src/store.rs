//! Fixture persistence: query filters, the store trait, and the in-memory store.

use crate::models::{EventId, Fixture, FixtureError, FixtureId, Phase, Scope, TournamentId};
use std::collections::HashSet;

/// Which events a query covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventFilter {
    /// Every event of the tournament (and fixtures with no event).
    Any,
    /// Exactly this event; `None` means fixtures attached to no event.
    Exactly(Option<EventId>),
}

/// Which phase a query covers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PhaseFilter {
    Any,
    /// `rr` plus legacy fixtures with no phase.
    RoundRobin,
    Knockout,
}

impl PhaseFilter {
    fn matches(self, fixture: &Fixture) -> bool {
        match self {
            PhaseFilter::Any => true,
            PhaseFilter::RoundRobin => fixture.effective_phase() == Phase::RoundRobin,
            PhaseFilter::Knockout => fixture.phase == Some(Phase::Knockout),
        }
    }
}

/// Filter over stored fixtures. Built from a tournament or scope and narrowed with the
/// builder methods.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixtureQuery {
    pub tournament_id: TournamentId,
    pub event: EventFilter,
    pub phase: PhaseFilter,
    pub round: Option<u32>,
    pub min_round: Option<u32>,
    pub match_index: Option<u32>,
}

impl FixtureQuery {
    /// All fixtures of a tournament, across events.
    pub fn tournament(tournament_id: TournamentId) -> Self {
        Self {
            tournament_id,
            event: EventFilter::Any,
            phase: PhaseFilter::Any,
            round: None,
            min_round: None,
            match_index: None,
        }
    }

    /// Fixtures of exactly this (tournament, event) scope.
    pub fn scope(scope: Scope) -> Self {
        Self {
            event: EventFilter::Exactly(scope.event_id),
            ..Self::tournament(scope.tournament_id)
        }
    }

    pub fn phase(mut self, phase: PhaseFilter) -> Self {
        self.phase = phase;
        self
    }

    pub fn round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    pub fn min_round(mut self, round: u32) -> Self {
        self.min_round = Some(round);
        self
    }

    pub fn match_index(mut self, match_index: u32) -> Self {
        self.match_index = Some(match_index);
        self
    }

    pub fn matches(&self, fixture: &Fixture) -> bool {
        let event_ok = match self.event {
            EventFilter::Any => true,
            EventFilter::Exactly(event_id) => fixture.event_id == event_id,
        };
        fixture.tournament_id == self.tournament_id
            && event_ok
            && self.phase.matches(fixture)
            && self.round.map_or(true, |r| fixture.round == r)
            && self.min_round.map_or(true, |r| fixture.round >= r)
            && self.match_index.map_or(true, |i| fixture.match_index == i)
    }
}

/// Storage used by the fixture service.
///
/// `insert_many` enforces one fixture per (tournament, event, phase, round, match_index)
/// and inserts nothing if any slot is taken.
pub trait FixtureStore {
    /// Matching fixtures ordered by (round, match_index).
    fn find(&self, query: &FixtureQuery) -> Result<Vec<Fixture>, FixtureError>;

    fn get(&self, id: FixtureId) -> Result<Option<Fixture>, FixtureError>;

    fn insert_many(&mut self, fixtures: Vec<Fixture>) -> Result<Vec<Fixture>, FixtureError>;

    /// Returns how many fixtures were removed.
    fn delete_many(&mut self, query: &FixtureQuery) -> Result<usize, FixtureError>;

    /// Overwrite a stored fixture with the same id.
    fn replace(&mut self, fixture: Fixture) -> Result<(), FixtureError>;

    fn find_one(&self, query: &FixtureQuery) -> Result<Option<Fixture>, FixtureError> {
        Ok(self.find(query)?.into_iter().next())
    }
}

type SlotKey = (TournamentId, Option<EventId>, Phase, u32, u32);

fn slot_key(f: &Fixture) -> SlotKey {
    (f.tournament_id, f.event_id, f.effective_phase(), f.round, f.match_index)
}

/// In-memory fixture store (insertion-ordered).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    fixtures: Vec<Fixture>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

impl FixtureStore for MemoryStore {
    fn find(&self, query: &FixtureQuery) -> Result<Vec<Fixture>, FixtureError> {
        let mut found: Vec<Fixture> = self
            .fixtures
            .iter()
            .filter(|f| query.matches(f))
            .cloned()
            .collect();
        found.sort_by_key(|f| (f.round, f.match_index));
        Ok(found)
    }

    fn get(&self, id: FixtureId) -> Result<Option<Fixture>, FixtureError> {
        Ok(self.fixtures.iter().find(|f| f.id == id).cloned())
    }

    fn insert_many(&mut self, fixtures: Vec<Fixture>) -> Result<Vec<Fixture>, FixtureError> {
        let mut taken: HashSet<SlotKey> = self.fixtures.iter().map(slot_key).collect();
        for f in &fixtures {
            if !taken.insert(slot_key(f)) {
                return Err(FixtureError::DuplicateSlot {
                    round: f.round,
                    match_index: f.match_index,
                });
            }
        }
        self.fixtures.extend(fixtures.iter().cloned());
        Ok(fixtures)
    }

    fn delete_many(&mut self, query: &FixtureQuery) -> Result<usize, FixtureError> {
        let before = self.fixtures.len();
        self.fixtures.retain(|f| !query.matches(f));
        Ok(before - self.fixtures.len())
    }

    fn replace(&mut self, fixture: Fixture) -> Result<(), FixtureError> {
        let slot = self
            .fixtures
            .iter_mut()
            .find(|f| f.id == fixture.id)
            .ok_or(FixtureError::FixtureNotFound(fixture.id))?;
        *slot = fixture;
        Ok(())
    }
}
