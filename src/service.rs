//! Fixture service: the engine's entry points over a fixture store and participant registry.
//!
//! Every mutating call holds the store's write lock from its first read to its last write,
//! so a generation's delete-then-insert and an update's read-modify-propagate are never
//! interleaved with another caller.

use crate::config::AppConfig;
use crate::directory::Directory;
use crate::logic::{
    apply_update, bracket_from_standings, compute_standings, generate_knockout,
    generate_round_robin, next_slot, propagates, settle_winner, Standing,
};
use crate::models::{
    Event, EventId, Fixture, FixtureError, FixtureId, FixtureUpdate, MatchFormat, Participant,
    ParticipantId, ParticipantSummary, Scope, Tournament, TournamentId,
};
use crate::store::{FixtureQuery, FixtureStore, PhaseFilter};
use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Body of a generate request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub event_id: Option<EventId>,
    /// Regenerate a hybrid event's round-robin phase, dropping its knockout fixtures.
    pub force: bool,
}

/// Body of a knockout-from-standings request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockoutRequest {
    pub event_id: Option<EventId>,
    pub qualifiers: Option<usize>,
}

pub struct FixtureService<S> {
    store: RwLock<S>,
    directory: RwLock<Directory>,
    default_qualifiers: usize,
}

fn lock_error<T>(_: T) -> FixtureError {
    FixtureError::Storage("lock poisoned".to_string())
}

impl<S: FixtureStore> FixtureService<S> {
    pub fn new(store: S, directory: Directory, config: &AppConfig) -> Self {
        Self {
            store: RwLock::new(store),
            directory: RwLock::new(directory),
            default_qualifiers: config.default_qualifiers,
        }
    }

    fn store(&self) -> Result<RwLockReadGuard<'_, S>, FixtureError> {
        self.store.read().map_err(lock_error)
    }

    fn store_mut(&self) -> Result<RwLockWriteGuard<'_, S>, FixtureError> {
        self.store.write().map_err(lock_error)
    }

    fn directory(&self) -> Result<RwLockReadGuard<'_, Directory>, FixtureError> {
        self.directory.read().map_err(lock_error)
    }

    fn directory_mut(&self) -> Result<RwLockWriteGuard<'_, Directory>, FixtureError> {
        self.directory.write().map_err(lock_error)
    }

    pub fn register_tournament(&self, tournament: Tournament) -> Result<Tournament, FixtureError> {
        self.directory_mut()?.add_tournament(tournament.clone());
        log::info!("Registered tournament {} ({} teams)", tournament.id, tournament.teams.len());
        Ok(tournament)
    }

    pub fn register_event(&self, event: Event) -> Result<Event, FixtureError> {
        self.directory_mut()?.add_event(event.clone())?;
        log::info!("Registered event {} ({:?})", event.id, event.format());
        Ok(event)
    }

    pub fn register_participant(
        &self,
        tournament_id: TournamentId,
        event_id: EventId,
        participant: Participant,
    ) -> Result<Participant, FixtureError> {
        self.directory_mut()?
            .add_participant(tournament_id, event_id, participant.clone())?;
        Ok(participant)
    }

    /// Participants for display: event entrants, or the tournament's teams without an event.
    pub fn teams(
        &self,
        tournament_id: TournamentId,
        event_id: Option<EventId>,
    ) -> Result<Vec<ParticipantSummary>, FixtureError> {
        let directory = self.directory()?;
        Ok(directory
            .listed_participants(tournament_id, event_id)?
            .into_iter()
            .map(Participant::summary)
            .collect())
    }

    /// Raw fixture listing. Without an event, every event of the tournament is included.
    pub fn fixtures(
        &self,
        tournament_id: TournamentId,
        event_id: Option<EventId>,
    ) -> Result<Vec<Fixture>, FixtureError> {
        let query = match event_id {
            Some(event_id) => FixtureQuery::scope(Scope::new(tournament_id, Some(event_id))),
            None => FixtureQuery::tournament(tournament_id),
        };
        self.store()?.find(&query)
    }

    /// Generate fixtures for a tournament or one of its events, by the event's match format.
    ///
    /// - Round-robin: the scope is cleared and a fresh schedule inserted.
    /// - Knockout (or no event): participants are shuffled, the scope cleared, and a bracket
    ///   inserted from round 0.
    /// - Round-robin + knockout: only the round-robin phase is generated. Existing round-robin
    ///   fixtures are kept unless `force`, which also drops the knockout phase.
    pub fn generate(
        &self,
        tournament_id: TournamentId,
        request: GenerateRequest,
    ) -> Result<Vec<Fixture>, FixtureError> {
        let scope = Scope::new(tournament_id, request.event_id);
        let (mut participants, format) = {
            let directory = self.directory()?;
            let participants = directory.entrant_ids(tournament_id, request.event_id)?;
            let format = match request.event_id {
                Some(event_id) => directory.event(tournament_id, event_id)?.format(),
                None => MatchFormat::Knockout,
            };
            (participants, format)
        };
        if participants.len() < 2 {
            return Err(FixtureError::NotEnoughParticipants {
                found: participants.len(),
            });
        }

        let mut store = self.store_mut()?;
        let whole_scope = FixtureQuery::scope(scope);
        let fixtures = match format {
            MatchFormat::RoundRobinKnockout => {
                let round_robin = whole_scope.phase(PhaseFilter::RoundRobin);
                let existing = store.find(&round_robin)?;
                if !existing.is_empty() {
                    if !request.force {
                        return Err(FixtureError::AlreadyGenerated);
                    }
                    let dropped = store.delete_many(&whole_scope.phase(PhaseFilter::Knockout))?;
                    log::debug!("Dropped {} knockout fixture(s) for {:?}", dropped, scope);
                }
                let dropped = store.delete_many(&round_robin)?;
                log::debug!("Dropped {} round-robin fixture(s) for {:?}", dropped, scope);
                generate_round_robin(scope, &participants)?
            }
            MatchFormat::RoundRobin => {
                let dropped = store.delete_many(&whole_scope)?;
                log::debug!("Dropped {} fixture(s) for {:?}", dropped, scope);
                generate_round_robin(scope, &participants)?
            }
            MatchFormat::Knockout => {
                participants.shuffle(&mut rand::thread_rng());
                let dropped = store.delete_many(&whole_scope)?;
                log::debug!("Dropped {} fixture(s) for {:?}", dropped, scope);
                generate_knockout(scope, &participants, 0)?
            }
        };

        let created = store.insert_many(fixtures)?;
        log::info!(
            "Generated {} {:?} fixture(s) for {} participant(s) in {:?}",
            created.len(),
            format,
            participants.len(),
            scope
        );
        Ok(created)
    }

    /// Build the knockout stage of a round-robin + knockout event from its standings.
    ///
    /// The bracket starts one round after the last round-robin round; knockout fixtures from
    /// that round on are replaced.
    pub fn generate_knockout_from_standings(
        &self,
        tournament_id: TournamentId,
        request: KnockoutRequest,
    ) -> Result<Vec<Fixture>, FixtureError> {
        let event_id = request.event_id.ok_or(FixtureError::EventRequired)?;
        {
            let directory = self.directory()?;
            if !directory.event(tournament_id, event_id)?.format().is_hybrid() {
                return Err(FixtureError::NotHybridEvent);
            }
        }
        let qualifiers = request.qualifiers.unwrap_or(self.default_qualifiers);
        let scope = Scope::new(tournament_id, Some(event_id));

        let mut store = self.store_mut()?;
        let round_robin = store.find(&FixtureQuery::scope(scope).phase(PhaseFilter::RoundRobin))?;
        let bracket = bracket_from_standings(scope, &round_robin, qualifiers)?;
        let start_round = bracket.first().map_or(0, |f| f.round);

        let stale = FixtureQuery::scope(scope)
            .phase(PhaseFilter::Knockout)
            .min_round(start_round);
        let dropped = store.delete_many(&stale)?;
        log::debug!("Dropped {} knockout fixture(s) from round {}", dropped, start_round);

        let created = store.insert_many(bracket)?;
        log::info!(
            "Generated knockout stage of {} fixture(s) from round {} for {:?}",
            created.len(),
            start_round,
            scope
        );
        Ok(created)
    }

    /// Record a result or other change on one fixture and move its winner into the next
    /// bracket round.
    ///
    /// The winner is settled from the persisted state, so split score updates still
    /// produce one. Failure to propagate is logged; the update itself still succeeds.
    pub fn update_fixture(
        &self,
        fixture_id: FixtureId,
        update: FixtureUpdate,
    ) -> Result<Fixture, FixtureError> {
        let mut store = self.store_mut()?;
        let current = store
            .get(fixture_id)?
            .ok_or(FixtureError::FixtureNotFound(fixture_id))?;
        store.replace(apply_update(&current, &update))?;

        let mut persisted = store
            .get(fixture_id)?
            .ok_or(FixtureError::FixtureNotFound(fixture_id))?;
        if settle_winner(&mut persisted) {
            store.replace(persisted.clone())?;
        }
        log::info!(
            "Updated fixture {} (round {}, match {}): {:?}-{:?}",
            persisted.id,
            persisted.round,
            persisted.match_index,
            persisted.score_a,
            persisted.score_b
        );

        if let Some(winner) = persisted.winner.filter(|_| propagates(&persisted)) {
            if let Err(err) = propagate_winner(&mut *store, &persisted, winner) {
                log::warn!("Could not propagate winner of fixture {}: {}", persisted.id, err);
            }
        }
        Ok(persisted)
    }

    /// Ranked standings. For round-robin + knockout events only the round-robin phase counts.
    pub fn standings(
        &self,
        tournament_id: TournamentId,
        event_id: Option<EventId>,
    ) -> Result<Vec<Standing>, FixtureError> {
        let query = match event_id {
            Some(event_id) => {
                let hybrid = self.directory()?.event(tournament_id, event_id)?.format().is_hybrid();
                let query = FixtureQuery::scope(Scope::new(tournament_id, Some(event_id)));
                if hybrid {
                    query.phase(PhaseFilter::RoundRobin)
                } else {
                    query
                }
            }
            None => FixtureQuery::tournament(tournament_id),
        };
        let fixtures = self.store()?.find(&query)?;
        Ok(compute_standings(&fixtures))
    }
}

/// Put `winner` into its slot of the next round's knockout fixture, if there is one.
fn propagate_winner<S: FixtureStore + ?Sized>(
    store: &mut S,
    fixture: &Fixture,
    winner: ParticipantId,
) -> Result<Option<Fixture>, FixtureError> {
    let (round, match_index, side) = next_slot(fixture.round, fixture.match_index);
    let query = FixtureQuery::scope(fixture.scope())
        .phase(PhaseFilter::Knockout)
        .round(round)
        .match_index(match_index);
    let Some(mut next) = store.find_one(&query)? else {
        return Ok(None);
    };
    next.set_team(side, Some(winner));
    next.updated_at = Utc::now();
    store.replace(next.clone())?;
    log::debug!("Advanced {} to round {} match {} ({:?})", winner, round, match_index, side);
    Ok(Some(next))
}
