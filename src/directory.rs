//! Tournament, event and participant registry consulted by the fixture service.

use crate::models::{
    Event, EventId, EventKind, FixtureError, Participant, ParticipantEntry, ParticipantId,
    Tournament, TournamentId,
};
use std::collections::HashMap;

/// In-memory registry. Participants are kept in registration order, which is the order
/// generation sees them in.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    tournaments: HashMap<TournamentId, Tournament>,
    events: HashMap<EventId, Event>,
    entrants: HashMap<EventId, Vec<Participant>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tournament(&mut self, tournament: Tournament) -> TournamentId {
        let id = tournament.id;
        self.tournaments.insert(id, tournament);
        id
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, FixtureError> {
        self.tournaments
            .get(&id)
            .ok_or(FixtureError::TournamentNotFound(id))
    }

    /// Register an event; its tournament must exist.
    pub fn add_event(&mut self, event: Event) -> Result<EventId, FixtureError> {
        self.tournament(event.tournament_id)?;
        let id = event.id;
        self.events.insert(id, event);
        Ok(id)
    }

    /// Look up an event of this tournament.
    pub fn event(&self, tournament_id: TournamentId, id: EventId) -> Result<&Event, FixtureError> {
        self.events
            .get(&id)
            .filter(|e| e.tournament_id == tournament_id)
            .ok_or(FixtureError::EventNotFound(id))
    }

    pub fn add_participant(
        &mut self,
        tournament_id: TournamentId,
        event_id: EventId,
        participant: Participant,
    ) -> Result<ParticipantId, FixtureError> {
        self.event(tournament_id, event_id)?;
        let id = participant.id;
        self.entrants.entry(event_id).or_default().push(participant);
        Ok(id)
    }

    /// Entrants of an event that match its kind: individuals for individual events, pairs
    /// for group events.
    pub fn event_participants(&self, event: &Event) -> Vec<&Participant> {
        self.entrants
            .get(&event.id)
            .map(|list| {
                list.iter()
                    .filter(|p| match (&p.entry, event.kind) {
                        (ParticipantEntry::Individual { .. }, EventKind::Individual) => true,
                        (ParticipantEntry::Pair { .. }, EventKind::Group) => true,
                        _ => false,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Participants as listed for display: the event's entrants when an event is given,
    /// otherwise the tournament's own teams.
    pub fn listed_participants(
        &self,
        tournament_id: TournamentId,
        event_id: Option<EventId>,
    ) -> Result<Vec<&Participant>, FixtureError> {
        match event_id {
            Some(event_id) => {
                let event = self.event(tournament_id, event_id)?;
                Ok(self.event_participants(event))
            }
            None => Ok(self.tournament(tournament_id)?.teams.iter().collect()),
        }
    }

    /// Participant ids fixtures are generated for. Falls back to the tournament's teams when
    /// the event has no entrants.
    pub fn entrant_ids(
        &self,
        tournament_id: TournamentId,
        event_id: Option<EventId>,
    ) -> Result<Vec<ParticipantId>, FixtureError> {
        let tournament = self.tournament(tournament_id)?;
        let mut ids: Vec<ParticipantId> = match event_id {
            Some(event_id) => {
                let event = self.event(tournament_id, event_id)?;
                self.event_participants(event).iter().map(|p| p.id).collect()
            }
            None => Vec::new(),
        };
        if ids.is_empty() {
            ids = tournament.teams.iter().map(|t| t.id).collect();
        }
        Ok(ids)
    }
}
